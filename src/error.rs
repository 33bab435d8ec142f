// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::progression::ProgressionError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Unknown quest: {0}")]
    UnknownQuest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ProgressionError> for AppError {
    fn from(err: ProgressionError) -> Self {
        match err {
            ProgressionError::InvalidRequest(msg) => AppError::InvalidRequest(msg),
            ProgressionError::AlreadyCompleted(msg) => AppError::AlreadyCompleted(msg),
            ProgressionError::UnknownQuest(id) => AppError::UnknownQuest(id),
        }
    }
}

/// Bodies that fail to parse get the same JSON error shape as every other
/// bad request instead of axum's plain-text rejection.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidRequest(errors.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// HTTP status and stable machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::AlreadyCompleted(_) => (StatusCode::CONFLICT, "already_completed"),
            AppError::UnknownQuest(_) => (StatusCode::NOT_FOUND, "unknown_quest"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::StorageUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_code();

        let details = match &self {
            AppError::NotFound(msg)
            | AppError::InvalidRequest(msg)
            | AppError::AlreadyCompleted(msg)
            | AppError::UnknownQuest(msg)
            | AppError::Conflict(msg) => Some(msg.clone()),
            AppError::StorageUnavailable(msg) => {
                tracing::error!(error = %msg, "Storage error");
                None
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                None
            }
            AppError::Unauthorized | AppError::InvalidToken | AppError::InvalidCredentials => None,
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::progression::CompletionRequest;

    #[test]
    fn test_json_rejection_is_invalid_request() {
        let rejection = Json::<CompletionRequest>::from_bytes(br#"{"kind":"weekly"}"#)
            .err()
            .unwrap();
        let err: AppError = rejection.into();
        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "invalid_request")
        );

        let syntax = Json::<CompletionRequest>::from_bytes(b"{not json")
            .err()
            .unwrap();
        assert!(matches!(AppError::from(syntax), AppError::InvalidRequest(_)));
    }

    #[test]
    fn test_domain_errors_have_distinct_codes() {
        let invalid: AppError = ProgressionError::InvalidRequest("x".into()).into();
        let already: AppError = ProgressionError::AlreadyCompleted("x".into()).into();
        let unknown: AppError = ProgressionError::UnknownQuest("x".into()).into();

        assert_eq!(
            invalid.status_and_code(),
            (StatusCode::BAD_REQUEST, "invalid_request")
        );
        assert_eq!(
            already.status_and_code(),
            (StatusCode::CONFLICT, "already_completed")
        );
        assert_eq!(
            unknown.status_and_code(),
            (StatusCode::NOT_FOUND, "unknown_quest")
        );
    }

    #[test]
    fn test_storage_error_is_service_unavailable() {
        let response = AppError::StorageUnavailable("connection reset".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
