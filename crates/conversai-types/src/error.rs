use thiserror::Error;

use crate::chat::ExchangeStage;

/// Errors from repository operations (used by trait definitions in conversai-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors that end a chat exchange without a reply.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no message provided")]
    MissingMessage,

    #[error("unexpected failure at stage {stage}: {message}")]
    Unexpected {
        stage: ExchangeStage,
        message: String,
    },
}

/// Configuration values that cannot be used to start the service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("server host must not be empty")]
    EmptyHost,

    #[error("inference api_url must be an http(s) URL, got '{0}'")]
    InvalidApiUrl(String),

    #[error("inference max_attempts must be at least 1")]
    NoAttempts,

    #[error("inference timeout_secs must be at least 1")]
    ZeroTimeout,

    #[error("storage database_file must not be empty")]
    EmptyDatabaseFile,
}

impl ChatError {
    /// The exchange stage that was current when this error was raised.
    pub fn stage(&self) -> ExchangeStage {
        match self {
            ChatError::MissingMessage => ExchangeStage::Received,
            ChatError::Unexpected { stage, .. } => *stage,
        }
    }
}
