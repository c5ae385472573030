//! Chat service: one request/reply exchange per call.
//!
//! Each exchange walks `Received -> Validated -> Inferred -> Persisted ->
//! Responded`. Only validation can end it early. Inference failures are
//! answered with their fallback reply and the exchange carries on; storage
//! failures are logged by the store and the reply is still returned.

use std::sync::Arc;

use chrono::Utc;
use conversai_types::chat::{ChatReply, ChatRequest, ExchangeStage};
use conversai_types::error::ChatError;
use conversai_types::turn::{ConversationTurn, SessionSummary};
use tracing::{Instrument, Span, debug, error, field, info, info_span, warn};

use crate::chat::session::{SessionIdGenerator, normalize_session_id};
use crate::inference::box_backend::BoxInferenceBackend;
use crate::store::conversation::ConversationStore;
use crate::store::repository::ConversationRepository;

/// Maximum number of turns returned by a history lookup.
pub const HISTORY_LIMIT: u32 = 20;

/// Orchestrates inference and persistence for chat exchanges.
///
/// Generic over `ConversationRepository` so conversai-core never depends on
/// conversai-infra.
pub struct ChatService<R: ConversationRepository> {
    backend: BoxInferenceBackend,
    store: ConversationStore<R>,
    session_ids: Arc<dyn SessionIdGenerator>,
}

impl<R: ConversationRepository> ChatService<R> {
    pub fn new(
        backend: BoxInferenceBackend,
        store: ConversationStore<R>,
        session_ids: Arc<dyn SessionIdGenerator>,
    ) -> Self {
        Self {
            backend,
            store,
            session_ids,
        }
    }

    /// Access the conversation store.
    pub fn store(&self) -> &ConversationStore<R> {
        &self.store
    }

    /// Name of the inference backend in use.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Whether the inference backend has a credential.
    pub fn inference_configured(&self) -> bool {
        self.backend.is_configured()
    }

    /// Run one chat exchange.
    ///
    /// # Errors
    ///
    /// [`ChatError::MissingMessage`] when the message is absent or blank.
    /// [`ChatError::Unexpected`] when no usable session id could be assigned.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let span = info_span!(
            "chat_exchange",
            session_id = field::Empty,
            stage = %ExchangeStage::Received,
        );
        self.run_exchange(request).instrument(span).await
    }

    async fn run_exchange(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let mut stage = ExchangeStage::Received;

        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or(ChatError::MissingMessage)?;

        let session_id = match normalize_session_id(request.session_id.as_deref()) {
            Some(id) => id,
            None => {
                let minted = self.session_ids.generate();
                if minted.trim().is_empty() {
                    return Err(ChatError::Unexpected {
                        stage,
                        message: "session id generator returned an empty id".to_string(),
                    });
                }
                debug!(session_id = %minted, "assigned new session id");
                minted
            }
        };
        Span::current().record("session_id", field::display(&session_id));
        stage = advance(stage);

        info!(message_len = message.len(), "received chat message");

        let reply = match self.backend.generate(message).await {
            Ok(text) => text,
            Err(failure) => {
                if failure.is_configuration_error() {
                    error!(backend = self.backend.name(), error = %failure, "inference backend misconfigured");
                } else {
                    warn!(backend = self.backend.name(), kind = %failure.kind(), error = %failure, "inference failed, using fallback reply");
                }
                failure.fallback_reply().to_string()
            }
        };
        stage = advance(stage);

        if !self.store.append(&session_id, message, &reply).await {
            warn!("reply will be returned without being persisted");
        }
        stage = advance(stage);

        let chat_reply = ChatReply {
            reply,
            session_id,
            timestamp: Utc::now(),
        };
        advance(stage);

        info!(reply_len = chat_reply.reply.len(), "chat exchange complete");
        Ok(chat_reply)
    }

    /// Most recent turns for a session, newest first, capped at [`HISTORY_LIMIT`].
    pub async fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.store.recent(session_id, HISTORY_LIMIT).await
    }

    /// Known sessions, newest activity first.
    pub async fn sessions(&self) -> Vec<SessionSummary> {
        self.store.summaries().await
    }
}

/// Move to the next stage and record it on the current span.
fn advance(stage: ExchangeStage) -> ExchangeStage {
    let next = stage.next().unwrap_or(stage);
    Span::current().record("stage", field::display(next));
    next
}
