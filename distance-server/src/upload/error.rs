//! Upload parsing errors.

/// Errors from reading the origin column out of an uploaded spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The file is not a readable workbook or CSV document
    #[error("unreadable spreadsheet: {0}")]
    Unreadable(String),

    /// The header row has no `origin` column
    #[error("spreadsheet has no '{column}' column")]
    MissingOriginColumn { column: &'static str },
}

impl From<csv::Error> for UploadError {
    fn from(err: csv::Error) -> Self {
        UploadError::Unreadable(err.to_string())
    }
}

impl From<calamine::Error> for UploadError {
    fn from(err: calamine::Error) -> Self {
        UploadError::Unreadable(err.to_string())
    }
}
