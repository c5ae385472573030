//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! `ChatService` is generic over its repository, but AppState pins it to the
//! SQLite implementation. The inference backend is type-erased so tests can
//! swap in a scripted one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use conversai_core::chat::service::ChatService;
use conversai_core::chat::session::UuidSessionIdGenerator;
use conversai_core::inference::box_backend::BoxInferenceBackend;
use conversai_core::store::conversation::ConversationStore;
use conversai_infra::config::{database_path, mask_token, resolve_token};
use conversai_infra::inference::huggingface::HuggingFaceClient;
use conversai_infra::sqlite::conversation::SqliteConversationRepository;
use conversai_infra::sqlite::pool::{DatabasePool, database_url};
use conversai_types::config::AppConfig;

/// Chat service pinned to the SQLite repository.
pub type ConcreteChatService = ChatService<SqliteConversationRepository>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: open the database, build the
    /// inference client, wire services.
    pub async fn init(config: AppConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        config.validate().context("invalid configuration")?;

        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let db_path = database_path(&data_dir, &config);
        let db_pool = DatabasePool::new(&database_url(&db_path))
            .await
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;

        let token = resolve_token();
        match &token {
            Some(token) => info!(
                token = %mask_token(token.expose_secret()),
                "loaded inference token"
            ),
            None => warn!(
                "HF_TOKEN is not set; chat replies will say the AI service is not configured"
            ),
        }

        let client = HuggingFaceClient::new(&config.inference, token)
            .context("failed to build inference HTTP client")?;
        info!(model = client.model(), "inference backend ready");

        Ok(Self::from_parts(
            config,
            data_dir,
            db_pool,
            BoxInferenceBackend::new(client),
        ))
    }

    /// Wire services from already-built parts.
    pub fn from_parts(
        config: AppConfig,
        data_dir: PathBuf,
        db_pool: DatabasePool,
        backend: BoxInferenceBackend,
    ) -> Self {
        let store = ConversationStore::new(SqliteConversationRepository::new(db_pool.clone()));
        let chat_service = ChatService::new(backend, store, Arc::new(UuidSessionIdGenerator));

        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        }
    }
}
