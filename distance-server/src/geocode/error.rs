//! Geocoding client error types.

use crate::domain::InvalidCoordinate;

/// Errors that can occur when resolving a postcode.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service does not recognise the postcode
    #[error("postcode not found: {postcode}")]
    NotFound { postcode: String },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Postcode is known but has no coordinates (e.g. terminated postcodes)
    #[error("no coordinates for postcode {postcode}")]
    MissingCoordinates { postcode: String },

    /// Coordinates were present but out of range
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Base URL cannot carry a path
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
