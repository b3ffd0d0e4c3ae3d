//! Catalog loading errors.

use std::path::PathBuf;

/// Errors that prevent the destination catalog from loading.
///
/// All of these are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Source file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is not a JSON array of destination objects
    #[error("malformed destination list: {0}")]
    Json(#[from] serde_json::Error),

    /// Source parsed but lists no destinations
    #[error("destination list is empty")]
    Empty,

    /// An entry has a blank postcode
    #[error("destination #{index} has a blank postcode")]
    BlankPostcode { index: usize },

    /// The same postcode appears more than once
    #[error("duplicate destination postcode: {postcode}")]
    DuplicatePostcode { postcode: String },
}
