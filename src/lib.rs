//! dandi-gateway
//!
//! Backend for an API-key dashboard:
//! - Bearer key lifecycle (create, list, update, delete, validate)
//! - GitHub repository summarization for valid key holders
//! - Optional structured README digestion through a completion service
//! - User provisioning on OAuth sign-in

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::AppState;
use config::StorageBackend;
use infrastructure::api_key::{ApiKeyService, InMemoryApiKeyRepository, PostgresApiKeyRepository};
use infrastructure::github::GitHubClient;
use infrastructure::http::{HttpApi, HttpClient};
use infrastructure::llm::OpenAiReadmeSummarizer;
use infrastructure::summarizer::RepoSummarizer;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserService};

/// Wire up repositories, outbound clients, and services from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let http: Arc<dyn HttpApi> = Arc::new(HttpClient::with_timeout(Duration::from_secs(
        config.outbound.timeout_secs,
    ))?);

    let (api_keys, users) = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage backend");
            (
                ApiKeyService::new(Arc::new(InMemoryApiKeyRepository::new())),
                UserService::new(Arc::new(InMemoryUserRepository::new())),
            )
        }
        StorageBackend::Postgres => {
            let url = std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set for the postgres storage backend")?;

            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            info!("Connected to PostgreSQL");

            let key_repo = PostgresApiKeyRepository::new(pool.clone());
            key_repo.ensure_schema().await?;

            let user_repo = PostgresUserRepository::new(pool);
            user_repo.ensure_schema().await?;

            (
                ApiKeyService::new(Arc::new(key_repo)),
                UserService::new(Arc::new(user_repo)),
            )
        }
    };

    let github = GitHubClient::new(http.clone())
        .with_base_url(config.github.base_url.clone())
        .with_user_agent(config.github.user_agent.clone());

    let readme_digest = match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            info!(model = %config.openai.model, "README summarization enabled");
            Some(Arc::new(
                OpenAiReadmeSummarizer::new(http, key)
                    .with_base_url(config.openai.base_url.clone())
                    .with_model(config.openai.model.clone()),
            ))
        }
        _ => {
            info!("OPENAI_API_KEY not set, README summarization disabled");
            None
        }
    };

    Ok(AppState {
        api_keys: Arc::new(api_keys),
        users: Arc::new(users),
        summarizer: Arc::new(RepoSummarizer::new(github)),
        readme_digest,
    })
}
