//! Application configuration
//!
//! Layered from `config/default`, `config/local`, then `APP__`-prefixed
//! environment variables. Secrets (`DATABASE_URL`, `OPENAI_API_KEY`) are
//! read straight from the environment and never live in config files.

use serde::Deserialize;

use crate::infrastructure::github;
use crate::infrastructure::llm;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub github: GitHubConfig,
    pub openai: OpenAiConfig,
    pub outbound: OutboundConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Which key/user store backs the service
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutboundConfig {
    /// Per-request timeout for upstream HTTP calls, in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: github::DEFAULT_BASE_URL.to_string(),
            user_agent: github::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: llm::DEFAULT_BASE_URL.to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.github.base_url, "https://api.github.com");
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.outbound.timeout_secs, 30);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"storage": {"backend": "postgres"}}"#).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_log_format_parsing() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level": "debug", "format": "json"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Json);
    }
}
