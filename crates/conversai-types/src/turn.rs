//! Conversation turn types.
//!
//! A turn is one user-message/bot-reply pair. Turns are append-only: once a
//! row exists it is never updated or deleted. Sessions are not stored
//! entities, just the `session_id` value shared by a group of turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single persisted exchange between the user and the bot.
///
/// `id` is assigned by the store and is strictly increasing in insertion
/// order, so it doubles as the ordering key for "most recent" queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: i64,
    pub session_id: String,
    pub user_input: String,
    pub bot_response: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new turn. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTurn {
    pub session_id: String,
    pub user_input: String,
    pub bot_response: String,
}

impl NewTurn {
    pub fn new(
        session_id: impl Into<String>,
        user_input: impl Into<String>,
        bot_response: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_input: user_input.into(),
            bot_response: bot_response.into(),
        }
    }
}

/// Aggregate view of one session, derived from its turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub turn_count: u32,
    pub last_activity: DateTime<Utc>,
}
