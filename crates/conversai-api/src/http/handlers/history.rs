//! Conversation history HTTP handler.
//!
//! - GET /api/history/{session_id} - Most recent turns, newest first

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use conversai_types::turn::ConversationTurn;

use crate::state::AppState;

/// One turn as shown to the browser client.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub user_input: String,
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ConversationTurn> for HistoryEntry {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            id: turn.id,
            user_input: turn.user_input,
            bot_response: turn.bot_response,
            timestamp: turn.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub conversations: Vec<HistoryEntry>,
}

/// GET /api/history/{session_id} - Unknown sessions yield an empty list.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<HistoryResponse> {
    let conversations = state
        .chat_service
        .history(&session_id)
        .await
        .into_iter()
        .map(HistoryEntry::from)
        .collect();

    Json(HistoryResponse {
        session_id,
        conversations,
    })
}
