//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use dossier_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around the domain error.
///
/// Handlers return `Result<_, ApiError>` so `?` converts any `AppError`
/// at the boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        let (status, code) = match err.kind {
            ErrorKind::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            ErrorKind::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::DuplicateUsername => (StatusCode::BAD_REQUEST, "DUPLICATE_USERNAME"),
            ErrorKind::SelfDeletion => (StatusCode::BAD_REQUEST, "SELF_DELETION"),
            ErrorKind::LastPrivilegedAccount => {
                (StatusCode::BAD_REQUEST, "LAST_PRIVILEGED_ACCOUNT")
            }
            ErrorKind::MissingRequiredFields => {
                (StatusCode::BAD_REQUEST, "MISSING_REQUIRED_FIELDS")
            }
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::WrongRecordPassword => (StatusCode::FORBIDDEN, "WRONG_RECORD_PASSWORD"),
            ErrorKind::Throttled => (StatusCode::TOO_MANY_REQUESTS, "THROTTLED"),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Internal => {
                // Internal detail goes to the log, never to the client.
                tracing::error!(kind = %err.kind, error = %err, "Internal server error");
                let body = ApiErrorResponse {
                    error: "INTERNAL_ERROR".to_string(),
                    message: "Internal server error".to_string(),
                };
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}
