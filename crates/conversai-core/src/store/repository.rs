//! ConversationRepository trait definition.
//!
//! Append-only persistence for conversation turns. There is intentionally no
//! update or delete operation.

use conversai_types::error::RepositoryError;
use conversai_types::turn::{ConversationTurn, NewTurn, SessionSummary};

/// Repository trait for conversation turn persistence.
///
/// Implementations live in conversai-infra (e.g., `SqliteConversationRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationRepository: Send + Sync {
    /// Insert a new turn. The store assigns the id and creation timestamp.
    fn insert_turn(
        &self,
        turn: &NewTurn,
    ) -> impl std::future::Future<Output = Result<ConversationTurn, RepositoryError>> + Send;

    /// Up to `limit` turns for a session, newest first.
    fn recent_turns(
        &self,
        session_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationTurn>, RepositoryError>> + Send;

    /// Distinct session ids, most recent activity first.
    fn session_ids(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;

    /// Per-session turn counts and last activity, most recent activity first.
    fn session_summaries(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SessionSummary>, RepositoryError>> + Send;

    /// Count total turns across all sessions.
    fn count_turns(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
