//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `conversai-core` with raw sqlx
//! queries, a private Row struct for mapping, and split reader/writer pool
//! usage. Timestamps are stored as fixed-width RFC 3339 text (microsecond
//! precision, `Z` suffix) so they compare correctly as strings.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use conversai_core::store::repository::ConversationRepository;
use conversai_types::error::RepositoryError;
use conversai_types::turn::{ConversationTurn, NewTurn, SessionSummary};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationRepository`.
#[derive(Clone)]
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

/// Internal row type for mapping SQLite rows to a domain ConversationTurn.
struct TurnRow {
    id: i64,
    session_id: String,
    user_input: String,
    bot_response: String,
    created_at: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            user_input: row.try_get("user_input")?,
            bot_response: row.try_get("bot_response")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_turn(self) -> Result<ConversationTurn, RepositoryError> {
        Ok(ConversationTurn {
            id: self.id,
            session_id: self.session_id,
            user_input: self.user_input,
            bot_response: self.bot_response,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Pool and I/O failures mean the database is unreachable; everything else
/// is a failed statement or row decode.
fn db_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl ConversationRepository for SqliteConversationRepository {
    async fn insert_turn(&self, turn: &NewTurn) -> Result<ConversationTurn, RepositoryError> {
        let created_at = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            r#"INSERT INTO conversation_turns (session_id, user_input, bot_response, created_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(&turn.session_id)
        .bind(&turn.user_input)
        .bind(&turn.bot_response)
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(db_error)?;

        Ok(ConversationTurn {
            id: result.last_insert_rowid(),
            session_id: turn.session_id.clone(),
            user_input: turn.user_input.clone(),
            bot_response: turn.bot_response.clone(),
            created_at,
        })
    }

    async fn recent_turns(
        &self,
        session_id: &str,
        limit: u32,
    ) -> Result<Vec<ConversationTurn>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM conversation_turns WHERE session_id = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(session_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(db_error)?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row = TurnRow::from_row(row).map_err(db_error)?;
            turns.push(turn_row.into_turn()?);
        }

        Ok(turns)
    }

    async fn session_ids(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT session_id FROM conversation_turns GROUP BY session_id ORDER BY MAX(id) DESC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(db_error)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("session_id").map_err(db_error))
            .collect()
    }

    async fn session_summaries(&self) -> Result<Vec<SessionSummary>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT session_id, COUNT(*) AS turn_count, MAX(created_at) AS last_activity
               FROM conversation_turns
               GROUP BY session_id
               ORDER BY MAX(id) DESC"#,
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(db_error)?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_id: String = row
                .try_get("session_id")
                .map_err(db_error)?;
            let turn_count: i64 = row
                .try_get("turn_count")
                .map_err(db_error)?;
            let last_activity: String = row
                .try_get("last_activity")
                .map_err(db_error)?;

            summaries.push(SessionSummary {
                session_id,
                turn_count: turn_count as u32,
                last_activity: parse_datetime(&last_activity)?,
            });
        }

        Ok(summaries)
    }

    async fn count_turns(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM conversation_turns")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(db_error)?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(db_error)?;

        Ok(count as u64)
    }
}
