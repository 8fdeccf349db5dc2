//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction so every gateway endpoint
//! returns the same error shape, and maps [`RelayError`] onto status codes.
//!
//! # Key invariants and assumptions
//! - Error responses carry a stable `code` and a human-readable `message`.
//! - Internal errors log details server-side but return a generic message.
use crate::api::types::ErrorResponse;
use crate::relay::RelayError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Structured API error returned by handlers.
///
/// `status` must match the semantics of `body.code`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
            request_id: None,
        },
    }
}

pub fn api_not_found(message: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, "not_found", message)
}

pub fn api_conflict(code: &str, message: &str) -> ApiError {
    api_error(StatusCode::CONFLICT, code, message)
}

/// Build a 422 error for identifiers or payloads that fail validation.
pub fn api_invalid_identifier(message: &str) -> ApiError {
    api_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_identifier", message)
}

pub fn api_unauthorized(message: &str) -> ApiError {
    api_error(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

pub fn api_forbidden(message: &str) -> ApiError {
    api_error(StatusCode::FORBIDDEN, "forbidden", message)
}

pub fn api_unavailable(message: &str) -> ApiError {
    api_error(StatusCode::SERVICE_UNAVAILABLE, "unavailable", message)
}

/// Build a 500 error, logging the underlying cause.
pub fn api_internal(message: &str, err: &anyhow::Error) -> ApiError {
    tracing::error!(error = ?err, "gateway internal error");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::InvalidIdentifier(err) => api_invalid_identifier(&err.to_string()),
            RelayError::AlreadyExists(key) => {
                api_conflict("already_exists", &format!("topic already exists: {key}"))
            }
            RelayError::NotFound(key) => api_not_found(&format!("topic not found: {key}")),
            RelayError::Unauthorized(message) => api_unauthorized(&message),
            RelayError::Forbidden(message) => api_forbidden(&message),
            RelayError::ServiceUnavailable(message) => api_unavailable(&message),
            RelayError::Internal(err) => api_internal("internal error", &err),
        }
    }
}

/// Undecodable request bodies are reported like any other invalid identifier.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        api_invalid_identifier(&rejection.body_text())
    }
}
