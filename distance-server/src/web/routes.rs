//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State, multipart::MultipartError},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use super::dto::*;
use super::state::AppState;
use super::submission::{InputError, Submission, UploadedFile, evaluate};
use super::templates::IndexTemplate;

/// Name of the multipart field carrying the spreadsheet.
const FILE_FIELD: &str = "file";

/// Name of the form field carrying a single origin.
const ORIGIN_FIELD: &str = "Origin";

/// Create the application router.
///
/// `static_dir` is served under `/static`. Request bodies larger than
/// `max_upload_bytes` are rejected before parsing.
pub fn create_router(
    state: AppState,
    static_dir: impl AsRef<Path>,
    max_upload_bytes: usize,
) -> Router {
    Router::new()
        .route("/", get(index_page).post(submit))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The empty form.
async fn index_page() -> Result<Html<String>, AppError> {
    render(&IndexTemplate::empty())
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Compute the result table for an uploaded file or a single origin.
///
/// Browsers get the page back with either the table or an inline error,
/// including when the body itself is unreadable or over the size limit.
/// Other clients get JSON, with input errors as 400s and oversized bodies
/// as 413s.
async fn submit(State(state): State<AppState>, request: Request) -> Result<Response, AppError> {
    let html = accepts_html(request.headers());
    let submission = match read_submission(request, &state).await {
        Ok(submission) => submission,
        Err(e) if html => {
            warn!(error = %e, "unreadable submission");
            let page = IndexTemplate::with_error("", e.input_error().to_string());
            return Ok(render(&page)?.into_response());
        }
        Err(e) => return Err(e.into()),
    };
    let origin = submission.typed_origin().to_string();

    let outcome = evaluate(&state.orchestrator, &state.catalog, submission).await;

    if html {
        let page = match outcome {
            Ok(rows) => IndexTemplate::with_rows(origin, rows),
            Err(e) => IndexTemplate::with_error(origin, e.to_string()),
        };
        Ok(render(&page)?.into_response())
    } else {
        match outcome {
            Ok(rows) => Ok(Json(RouteTableResponse { rows }).into_response()),
            Err(e) => Err(AppError::BadRequest {
                message: e.to_string(),
            }),
        }
    }
}

/// Why a request body could not be turned into a [`Submission`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum BodyError {
    /// The body hit the upload size limit
    #[error("request body exceeds the upload limit")]
    TooLarge,

    #[error("unreadable multipart body: {0}")]
    Multipart(String),

    #[error("unreadable form body: {0}")]
    Form(String),

    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(String),
}

impl BodyError {
    fn multipart(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            BodyError::TooLarge
        } else {
            BodyError::Multipart(message)
        }
    }

    fn form(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            BodyError::TooLarge
        } else {
            BodyError::Form(message)
        }
    }

    /// The message shown to a browser user.
    fn input_error(&self) -> InputError {
        match self {
            BodyError::TooLarge | BodyError::Multipart(_) => InputError::InvalidSpreadsheet,
            BodyError::Form(_) | BodyError::UnsupportedContentType(_) => InputError::MissingOrigin,
        }
    }
}

impl From<BodyError> for AppError {
    fn from(e: BodyError) -> Self {
        match e {
            BodyError::TooLarge => AppError::PayloadTooLarge {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

/// Parse the request body as a multipart or URL-encoded form.
async fn read_submission(request: Request, state: &AppState) -> Result<Submission, BodyError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| BodyError::multipart(e.status(), e.body_text()))?;
        read_multipart(multipart).await
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<OriginForm>::from_request(request, state)
            .await
            .map_err(|e| BodyError::form(e.status(), e.body_text()))?;
        Ok(Submission::from_parts(None, form.origin))
    } else {
        Err(BodyError::UnsupportedContentType(content_type))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<Submission, BodyError> {
    let mut file = None;
    let mut origin = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            file = Some(UploadedFile { file_name, bytes });
        } else if name == ORIGIN_FIELD {
            origin = Some(field.text().await.map_err(multipart_error)?);
        }
    }

    Ok(Submission::from_parts(file, origin))
}

fn multipart_error(e: MultipartError) -> BodyError {
    BodyError::multipart(e.status(), e.body_text())
}

fn render(template: &IndexTemplate) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    PayloadTooLarge { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::PayloadTooLarge { message } => {
                warn!(%message, "payload too large");
                (StatusCode::PAYLOAD_TOO_LARGE, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
