//! Origin extraction from uploaded spreadsheets.
//!
//! Accepts Excel/OpenDocument workbooks (first worksheet) and CSV files.
//! The first row is the header; the column named exactly `origin` is read
//! top to bottom, skipping empty cells.

mod error;

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

pub use error::UploadError;

/// Header of the column holding origin postcodes. Case-sensitive.
pub const ORIGIN_COLUMN: &str = "origin";

/// Leading bytes of a ZIP container (xlsx, xlsm, ods).
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Leading bytes of an OLE compound document (legacy xls).
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// How an upload will be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Workbook,
    Csv,
}

impl UploadFormat {
    /// Classify an upload by its leading bytes.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            UploadFormat::Workbook
        } else {
            UploadFormat::Csv
        }
    }
}

/// Read the non-empty values of the `origin` column, in row order.
///
/// Values are trimmed; cells that are empty after trimming are dropped.
pub fn extract_origins(bytes: &[u8]) -> Result<Vec<String>, UploadError> {
    match UploadFormat::detect(bytes) {
        UploadFormat::Workbook => origins_from_workbook(bytes),
        UploadFormat::Csv => origins_from_csv(bytes),
    }
}

fn origins_from_csv(bytes: &[u8]) -> Result<Vec<String>, UploadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == ORIGIN_COLUMN)
        .ok_or(UploadError::MissingOriginColumn {
            column: ORIGIN_COLUMN,
        })?;

    let mut origins = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(column).map(str::trim)
            && !value.is_empty()
        {
            origins.push(value.to_string());
        }
    }

    Ok(origins)
}

fn origins_from_workbook(bytes: &[u8]) -> Result<Vec<String>, UploadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| UploadError::Unreadable("workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(UploadError::MissingOriginColumn {
        column: ORIGIN_COLUMN,
    })?;

    let column = header
        .iter()
        .position(|cell| cell_text(cell).as_deref() == Some(ORIGIN_COLUMN))
        .ok_or(UploadError::MissingOriginColumn {
            column: ORIGIN_COLUMN,
        })?;

    Ok(rows
        .filter_map(|row| row.get(column).and_then(cell_text))
        .collect())
}

/// Text of a workbook cell, or `None` for empty and error cells.
///
/// Numbers use their shortest form, so `1234.0` reads as `"1234"`.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}
