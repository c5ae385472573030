//! Application configuration types for ConversAI.
//!
//! `AppConfig` represents the top-level `config.toml` in the data directory.
//! Every field has a default, so an empty or missing file yields a working
//! configuration. The inference credential is deliberately absent: it is
//! resolved from the process environment at startup and never written to disk.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration, built once at startup and passed down immutably.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Reject values the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        let url = self.inference.api_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(url.to_string()));
        }
        if self.inference.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.inference.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.storage.database_file.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseFile);
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the browser client. Served at `/` when it exists.
    #[serde(default)]
    pub web_dir: Option<String>,
    /// Origins allowed by CORS.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5001".to_string(),
        "http://127.0.0.1:5001".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: None,
            cors_origins: default_cors_origins(),
        }
    }
}

/// Remote text-generation endpoint and retry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total upstream calls allowed per generation, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Wait used when a warming-up response carries no `estimated_time`.
    #[serde(default = "default_warmup_wait_secs")]
    pub warmup_wait_secs: f64,
    /// Upper bound applied to a server-suggested warm-up wait.
    #[serde(default = "default_max_warmup_wait_secs")]
    pub max_warmup_wait_secs: f64,
    /// Fixed delay before retrying after a transport failure.
    #[serde(default = "default_network_retry_delay_secs")]
    pub network_retry_delay_secs: f64,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
}

fn default_api_url() -> String {
    "https://api-inference.huggingface.co/models/meta-llama/Llama-3.1-8B-Instruct".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_warmup_wait_secs() -> f64 {
    10.0
}

fn default_max_warmup_wait_secs() -> f64 {
    60.0
}

fn default_network_retry_delay_secs() -> f64 {
    2.0
}

fn default_max_new_tokens() -> u32 {
    250
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            warmup_wait_secs: default_warmup_wait_secs(),
            max_warmup_wait_secs: default_max_warmup_wait_secs(),
            network_retry_delay_secs: default_network_retry_delay_secs(),
            max_new_tokens: default_max_new_tokens(),
        }
    }
}

impl InferenceConfig {
    /// Model identifier derived from the endpoint URL (the part after `/models/`).
    ///
    /// Falls back to the full URL when the path does not follow that layout.
    pub fn model_name(&self) -> &str {
        self.api_url
            .split_once("/models/")
            .map(|(_, model)| model.trim_end_matches('/'))
            .filter(|model| !model.is_empty())
            .unwrap_or(&self.api_url)
    }
}

/// Local conversation store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file name, relative to the data directory unless absolute.
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

fn default_database_file() -> String {
    "conversations.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
        }
    }
}
