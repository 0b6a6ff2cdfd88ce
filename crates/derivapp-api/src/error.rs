use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<derivapp_storage::error::StorageError> for ApiError {
    fn from(e: derivapp_storage::error::StorageError) -> Self {
        use derivapp_storage::error::StorageError;
        match e {
            StorageError::NotFound { key } => {
                ApiError::NotFound(format!("document not found: {key}"))
            }
            StorageError::AlreadyExists { key } => {
                ApiError::Conflict(format!("document already exists: {key}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<derivapp_auth::error::AuthError> for ApiError {
    fn from(e: derivapp_auth::error::AuthError) -> Self {
        use derivapp_auth::error::AuthError;
        match e {
            AuthError::UserNotFound(user) => ApiError::NotFound(format!("user not found: {user}")),
            AuthError::Cognito(msg) => ApiError::Internal(msg),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<derivapp_core::error::CoreError> for ApiError {
    fn from(e: derivapp_core::error::CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
