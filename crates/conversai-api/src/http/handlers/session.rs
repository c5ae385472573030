//! Session listing HTTP handler.
//!
//! - GET /api/sessions - Known sessions with turn counts, newest activity first

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use conversai_types::turn::SessionSummary;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
}

/// GET /api/sessions - Empty list on storage failure.
pub async fn list_sessions(State(state): State<AppState>) -> Json<SessionsResponse> {
    Json(SessionsResponse {
        sessions: state.chat_service.sessions().await,
    })
}
