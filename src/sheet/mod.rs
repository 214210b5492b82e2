//! Tabular loader — spreadsheet rows → workflow description lines.
//!
//! DESIGN
//! ======
//! Reads one named sheet, treats its first row as the header, and renders each
//! data row as `"{group}: {step} to {to-step}, {task}"`. Column checks happen
//! before any row is rendered, so a bad sheet produces no lines at all.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, info};

/// Columns every workflow sheet must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 4] = ["group", "step", "to-step", "task"];

static EMPTY_CELL: Data = Data::Empty;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// The workbook could not be opened or the sheet could not be decoded.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// The workbook has no sheet with the requested name.
    #[error("sheet '{sheet}' not found in {path} (available: {available})")]
    SheetNotFound { path: String, sheet: String, available: String },

    /// One or more required header columns are absent.
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

impl crate::error::ErrorCode for SheetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } | Self::SheetNotFound { .. } => "E_SPREADSHEET_READ",
            Self::MissingColumns { .. } => "E_MISSING_COLUMNS",
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Load `sheet` from the workbook at `path` and render one line per data row.
///
/// # Errors
///
/// Returns [`SheetError::Read`] or [`SheetError::SheetNotFound`] when the
/// workbook or sheet cannot be read, and [`SheetError::MissingColumns`] when
/// the header lacks any of [`REQUIRED_COLUMNS`].
pub fn load_descriptions(path: &Path, sheet: &str) -> Result<Vec<String>, SheetError> {
    let display = path.display().to_string();
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SheetError::Read { path: display.clone(), message: e.to_string() })?;

    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet) {
        return Err(SheetError::SheetNotFound { path: display, sheet: sheet.to_owned(), available: names.join(", ") });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| SheetError::Read { path: display.clone(), message: e.to_string() })?;

    let lines = describe_range(&range)?;
    info!(path = %path.display(), sheet, rows = lines.len(), "sheet: loaded workflow rows");
    for line in &lines {
        debug!(%line, "sheet: row");
    }
    Ok(lines)
}

/// Render every data row of an already-loaded range.
///
/// # Errors
///
/// Returns [`SheetError::MissingColumns`] naming every absent required column.
pub fn describe_range(range: &Range<Data>) -> Result<Vec<String>, SheetError> {
    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_owned()).collect())
        .unwrap_or_default();

    let positions = REQUIRED_COLUMNS.map(|name| header.iter().position(|h| h == name));
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .zip(&positions)
        .filter(|(_, pos)| pos.is_none())
        .map(|(name, _)| (*name).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(SheetError::MissingColumns { columns: missing });
    }
    let columns: Vec<usize> = positions.into_iter().flatten().collect();

    let body: Vec<&[Data]> = rows
        .filter(|row| columns.iter().any(|&c| !is_blank(cell_at(row, c))))
        .collect();
    let numeric: Vec<bool> = columns
        .iter()
        .map(|&c| is_numeric_column(&body, c))
        .collect();

    let lines = body
        .iter()
        .map(|row| {
            let [group, step, to_step, task] =
                [0usize, 1, 2, 3].map(|i| cell_text(cell_at(row, columns[i]), numeric[i]));
            format!("{group}: {step} to {to_step}, {task}")
        })
        .collect();
    Ok(lines)
}

// =============================================================================
// CELLS
// =============================================================================

fn cell_at(row: &[Data], column: usize) -> &Data {
    row.get(column).unwrap_or(&EMPTY_CELL)
}

/// Error cells (`#N/A`, `#REF!`) count as missing values.
fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// A column is numeric when it has at least one number and nothing but numbers.
fn is_numeric_column(rows: &[&[Data]], column: usize) -> bool {
    let mut seen_number = false;
    for row in rows {
        match cell_at(row, column) {
            Data::Int(_) | Data::Float(_) => seen_number = true,
            cell if is_blank(cell) => {}
            _ => return false,
        }
    }
    seen_number
}

fn cell_text(cell: &Data, numeric: bool) -> String {
    if is_blank(cell) {
        return if numeric { "0".to_owned() } else { String::new() };
    }
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
