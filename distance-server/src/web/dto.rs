//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::ResultRow;

/// URL-encoded single-origin form.
#[derive(Debug, Default, Deserialize)]
pub struct OriginForm {
    #[serde(rename = "Origin")]
    pub origin: Option<String>,
}

/// Result table for JSON clients.
#[derive(Debug, Serialize)]
pub struct RouteTableResponse {
    pub rows: Vec<ResultRow>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
