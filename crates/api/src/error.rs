use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use roehrenboerse_core::error::CoreError;

use crate::services::ListingError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ListingError`] and [`CoreError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure from the listing service.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// A domain-level error from `roehrenboerse_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Listing(err) => classify_listing_error(err),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a listing service error into an HTTP status, error code, and message.
///
/// - Missing rows map to 404.
/// - Validation failures map to 400.
/// - Store failures map to 500 with a sanitized message; the full message is logged.
fn classify_listing_error(err: &ListingError) -> (StatusCode, &'static str, String) {
    match err {
        ListingError::NotFound(_) | ListingError::Update { missing: true, .. } => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        ListingError::Invalid(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        ListingError::Fetch(_)
        | ListingError::Create(_)
        | ListingError::Update { .. }
        | ListingError::Delete(_)
        | ListingError::Search(_) => {
            tracing::error!(error = %err, "Listing service error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
