//! Configuration loader for ConversAI.
//!
//! Reads `config.toml` from the data directory (`~/.conversai/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the file
//! is missing or malformed, then applies environment overrides. The inference
//! token is read from the environment only.

use std::path::{Path, PathBuf};

use conversai_types::config::AppConfig;
use secrecy::SecretString;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "CONVERSAI_DATA_DIR";
/// Environment variable holding the Hugging Face access token.
pub const TOKEN_ENV: &str = "HF_TOKEN";
pub const API_URL_ENV: &str = "CONVERSAI_API_URL";
pub const HOST_ENV: &str = "CONVERSAI_HOST";
pub const PORT_ENV: &str = "CONVERSAI_PORT";
pub const WEB_DIR_ENV: &str = "CONVERSAI_WEB_DIR";

/// Resolve the data directory: `CONVERSAI_DATA_DIR`, else `~/.conversai`,
/// else `./.conversai` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from), dirs::home_dir())
}

fn data_dir_from(explicit: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    explicit
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| home.unwrap_or_else(|| PathBuf::from(".")).join(".conversai"))
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Apply `CONVERSAI_*` environment overrides from the process environment.
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup. Blank values are ignored, and an
/// unparsable port is logged and ignored.
pub fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(url) = get(API_URL_ENV) {
        config.inference.api_url = url;
    }
    if let Some(host) = get(HOST_ENV) {
        config.server.host = host;
    }
    if let Some(port) = get(PORT_ENV) {
        match port.parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(err) => tracing::warn!("Ignoring {PORT_ENV}={port}: {err}"),
        }
    }
    if let Some(web_dir) = get(WEB_DIR_ENV) {
        config.server.web_dir = Some(web_dir);
    }
}

/// Read the inference token from `HF_TOKEN`. Blank counts as absent.
pub fn resolve_token() -> Option<SecretString> {
    token_from(std::env::var(TOKEN_ENV).ok())
}

fn token_from(raw: Option<String>) -> Option<SecretString> {
    raw.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(SecretString::from)
}

/// Render a token for logs as its first 5 and last 4 characters.
///
/// Tokens of 9 characters or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 9 {
        return "*".repeat(chars.len().max(3));
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Path of the SQLite database file inside the data directory.
pub fn database_path(data_dir: &Path, config: &AppConfig) -> PathBuf {
    data_dir.join(&config.storage.database_file)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 5001);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
port = 8080
web_dir = "frontend"

[inference]
max_attempts = 5

[storage]
database_file = "chat.db"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.web_dir.as_deref(), Some("frontend"));
        assert_eq!(config.inference.max_attempts, 5);
        assert_eq!(config.inference.timeout_secs, 30);
        assert_eq!(
            database_path(tmp.path(), &config),
            tmp.path().join("chat.db")
        );
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (API_URL_ENV, "http://localhost:9000/models/x"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "7000"),
            (WEB_DIR_ENV, "/srv/web"),
        ]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.inference.api_url, "http://localhost:9000/models/x");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.web_dir.as_deref(), Some("/srv/web"));
    }

    #[test]
    fn overrides_ignore_blank_and_invalid_values() {
        let env: HashMap<&str, &str> = HashMap::from([(HOST_ENV, "  "), (PORT_ENV, "not-a-port")]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn data_dir_prefers_explicit_path() {
        let dir = data_dir_from(Some(PathBuf::from("/data")), Some(PathBuf::from("/home/u")));
        assert_eq!(dir, PathBuf::from("/data"));

        let dir = data_dir_from(None, Some(PathBuf::from("/home/u")));
        assert_eq!(dir, PathBuf::from("/home/u/.conversai"));

        let dir = data_dir_from(Some(PathBuf::new()), None);
        assert_eq!(dir, PathBuf::from("./.conversai"));
    }

    #[test]
    fn token_blank_is_absent() {
        assert!(token_from(None).is_none());
        assert!(token_from(Some("   ".to_string())).is_none());
        let token = token_from(Some(" hf_abc ".to_string())).unwrap();
        assert_eq!(token.expose_secret(), "hf_abc");
    }

    #[test]
    fn mask_token_keeps_prefix_and_suffix() {
        assert_eq!(mask_token("hf_abcdefghijklmnop"), "hf_ab...mnop");
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token(""), "***");
    }
}
