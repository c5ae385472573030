//! HTTP request handlers for the REST API.

pub mod chat;
pub mod health;
pub mod history;
pub mod session;

use crate::http::error::AppError;

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
