//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::ResultRow;

/// The one page: both forms, any input error, and the results table.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Origin to prefill in the single-origin form
    pub origin: String,
    pub error: Option<String>,
    pub rows: Vec<ResultRow>,
}

impl IndexTemplate {
    /// The blank form.
    pub fn empty() -> Self {
        Self {
            origin: String::new(),
            error: None,
            rows: Vec::new(),
        }
    }

    /// A page showing an input error.
    pub fn with_error(origin: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            error: Some(error.into()),
            rows: Vec::new(),
        }
    }

    /// A page showing results.
    pub fn with_rows(origin: impl Into<String>, rows: Vec<ResultRow>) -> Self {
        Self {
            origin: origin.into(),
            error: None,
            rows,
        }
    }
}
