//! Spreadsheet export of the listing table.
//!
//! # Responsibility
//! - Encode a `Table` as a single-sheet `.xlsx` workbook.
//! - Decode such a workbook back into a `Table`.
//!
//! # Invariants
//! - Row 0 holds the display labels in fixed column order; there is no
//!   index column.
//! - Cell types survive the round trip (text, boolean, number, empty).
//! - Every data row is written, including all-blank ones, and the
//!   `Listings` name records the row count for the reader.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod xlsx;

pub use xlsx::{read_table, save_table, write_table};

/// Default download file name.
pub const EXPORT_FILE_NAME: &str = "job_data.xlsx";
/// MIME type offered with the download.
pub const EXPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Name of the only worksheet.
pub const SHEET_NAME: &str = "Sheet1";
/// Workbook-level defined name covering the header and every data row.
pub const TABLE_NAME: &str = "Listings";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Write(rust_xlsxwriter::XlsxError),
    Read(calamine::XlsxError),
    Io(std::io::Error),
    /// Workbook has no header row.
    MissingHeader,
    /// Header cell does not match the fixed column label.
    HeaderMismatch { column: usize, found: String },
    /// Decoded data row without one cell per column.
    RowShape { row: usize },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write(err) => write!(f, "failed to encode workbook: {err}"),
            Self::Read(err) => write!(f, "failed to decode workbook: {err}"),
            Self::Io(err) => write!(f, "failed to write export file: {err}"),
            Self::MissingHeader => write!(f, "workbook has no header row"),
            Self::HeaderMismatch { column, found } => {
                write!(f, "unexpected header `{found}` in column {column}")
            }
            Self::RowShape { row } => write!(f, "data row {row} has the wrong number of cells"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Write(err) => Some(err),
            Self::Read(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::MissingHeader | Self::HeaderMismatch { .. } | Self::RowShape { .. } => None,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Write(value)
    }
}

impl From<calamine::XlsxError> for ExportError {
    fn from(value: calamine::XlsxError) -> Self {
        Self::Read(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
