//! Web layer for the driving distance calculator.
//!
//! Serves the upload/origin form and renders result tables as HTML or JSON.

mod dto;
mod routes;
mod state;
pub mod submission;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LiveOrchestrator};
pub use submission::{InputError, Submission, UploadedFile, evaluate};
pub use templates::*;
