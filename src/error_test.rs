use super::*;

#[test]
fn diagnostic_prefixes_code() {
    #[derive(Debug, thiserror::Error)]
    #[error("sheet 'bk' not found")]
    struct NotFound;

    impl ErrorCode for NotFound {
        fn error_code(&self) -> &'static str {
            "E_SPREADSHEET_READ"
        }
    }

    assert_eq!(diagnostic(&NotFound), "error[E_SPREADSHEET_READ]: sheet 'bk' not found");
}
