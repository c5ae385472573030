//! Session identifier generation.
//!
//! The chat service mints a session id whenever a client omits one. The
//! generator is injected so tests can use predictable ids.

use uuid::Uuid;

/// Source of fresh session identifiers.
pub trait SessionIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Production generator: time-sortable UUID v7 strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSessionIdGenerator;

impl SessionIdGenerator for UuidSessionIdGenerator {
    fn generate(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Normalize a client-supplied session id: trimmed, or `None` when blank.
pub fn normalize_session_id(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
