//! Stable diagnostic codes for every error the pipeline can surface.

/// Machine-readable identity of an error kind, printed next to its message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// Render an error as the one-line diagnostic `main` prints before exiting.
pub fn diagnostic(err: &(impl ErrorCode + ?Sized)) -> String {
    format!("error[{}]: {err}", err.error_code())
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
