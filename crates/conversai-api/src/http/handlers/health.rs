//! GET /api/health - Liveness plus whether inference is configured.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// True when an inference credential is configured.
    pub model_loaded: bool,
    pub version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        model_loaded: state.chat_service.inference_configured(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
