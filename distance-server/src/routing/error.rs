//! Routing client error types.

use crate::domain::InvalidRoute;

/// Errors that can occur when requesting a route.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The server answered but found no route
    #[error("no route ({code}): {message}")]
    NoRoute { code: String, message: String },

    /// Route numbers were unusable
    #[error(transparent)]
    InvalidRoute(#[from] InvalidRoute),

    /// Base URL cannot carry a path
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
