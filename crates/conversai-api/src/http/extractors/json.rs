//! JSON body extractor whose rejection is an [`AppError`].
//!
//! axum's own `Json` rejects with a plain-text body. Wrapping it keeps every
//! 4xx from the API in the `{"error": true, "message": ...}` shape.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::http::error::AppError;

/// Deserialize the request body as JSON, rejecting with a 400 [`AppError`].
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "rejected JSON body");
                Err(AppError::Validation("No JSON data provided".to_string()))
            }
        }
    }
}
