//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"error": <message>, "code": <CODE>}`.
//! Storage and internal failures are logged in full and reported to the
//! client with a fixed message.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use creatorhub_core::error::CoreError;
use serde::Serialize;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Validation and lookup failures raised by `creatorhub_core` rules.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage failure: {0}")]
    Database(#[from] sqlx::Error),

    /// The request could not be decoded (JSON body, query string, multipart).
    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    /// The request outlived `REQUEST_TIMEOUT_SECS`.
    #[error("Request timed out")]
    Timeout,
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// Status, machine-readable code, and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::NotFoundByKey { entity, key, value }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No {} found with {key} {value}", entity.to_lowercase()),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "Request timed out".to_string(),
            ),
            AppError::Database(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            ),
            // A child row raced a delete of its creator.
            AppError::Database(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                tracing::warn!(error = %db, "Foreign key violation");
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Referenced creator does not exist".to_string(),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

/* --------------------------------------------------------------------------
Extractor rejections
-------------------------------------------------------------------------- */

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
