//! Application error type mapping to HTTP status codes.
//!
//! Every error body has the shape `{"error": true, "message": "..."}`.
//! Internal details are logged, never sent to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use conversai_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid client input.
    Validation(String),
    /// No route matched the request.
    NotFound,
    /// Unexpected server-side failure. The string is for logs only.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::MissingMessage => AppError::Validation("No message provided".to_string()),
            e @ ChatError::Unexpected { .. } => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Endpoint not found".to_string()),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": true, "message": message }))).into_response()
    }
}
