//! Chat HTTP handler.
//!
//! - POST /api/chat - One exchange: `{message, session_id?}` in, `{reply, session_id, timestamp}` out

use axum::Json;
use axum::extract::State;

use conversai_types::chat::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::state::AppState;

/// POST /api/chat - Relay a message to the model and return its reply.
///
/// Inference failures still answer 200 with a fallback reply. Only a
/// missing message (400) or an unexpected failure (500) is an error.
pub async fn chat(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state.chat_service.handle(request).await?;
    Ok(Json(reply))
}
