//! Conversation store facade.
//!
//! Wraps a [`ConversationRepository`] and applies the storage failure policy:
//! a failed write becomes `false`, a failed read becomes an empty result, and
//! both are logged. Callers never see a storage error.

use conversai_types::turn::{ConversationTurn, NewTurn, SessionSummary};
use tracing::{debug, warn};

use super::repository::ConversationRepository;

/// Append-only conversation log that never fails its caller.
pub struct ConversationStore<R: ConversationRepository> {
    repo: R,
}

impl<R: ConversationRepository> ConversationStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Insert one immutable turn. Returns `false` if the write failed.
    pub async fn append(&self, session_id: &str, user_text: &str, bot_text: &str) -> bool {
        let turn = NewTurn::new(session_id, user_text, bot_text);
        match self.repo.insert_turn(&turn).await {
            Ok(stored) => {
                debug!(session_id, turn_id = stored.id, "conversation turn saved");
                true
            }
            Err(e) => {
                warn!(session_id, error = %e, "failed to save conversation turn");
                false
            }
        }
    }

    /// Up to `limit` turns for the session, newest first.
    ///
    /// Empty when the session has no turns or the read failed.
    pub async fn recent(&self, session_id: &str, limit: u32) -> Vec<ConversationTurn> {
        match self.repo.recent_turns(session_id, limit).await {
            Ok(turns) => turns,
            Err(e) => {
                warn!(session_id, error = %e, "failed to read conversation history");
                Vec::new()
            }
        }
    }

    /// Distinct session ids, newest activity first. Empty on failure.
    pub async fn all_session_ids(&self) -> Vec<String> {
        match self.repo.session_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "failed to list sessions");
                Vec::new()
            }
        }
    }

    /// Session summaries, newest activity first. Empty on failure.
    pub async fn summaries(&self) -> Vec<SessionSummary> {
        match self.repo.session_summaries().await {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!(error = %e, "failed to summarize sessions");
                Vec::new()
            }
        }
    }
}
