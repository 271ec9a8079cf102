//! GitHub REST API client

use std::sync::Arc;

use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use crate::domain::github::RepoRef;
use crate::domain::DomainError;
use crate::infrastructure::http::HttpApi;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "dandi-gateway";

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Repository metadata as returned by `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub watchers_count: u64,
    pub open_issues_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub default_branch: Option<String>,
    pub license: Option<RepoLicense>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoLicense {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReadmeResponse {
    content: Option<String>,
}

/// Client for the repository endpoints we consume
#[derive(Debug)]
pub struct GitHubClient {
    http: Arc<dyn HttpApi>,
    base_url: String,
    user_agent: String,
}

impl GitHubClient {
    pub fn new(http: Arc<dyn HttpApi>) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Point the client at a different API host (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        // GitHub rejects requests without a User-Agent
        vec![("Accept", ACCEPT_HEADER), ("User-Agent", &self.user_agent)]
    }

    /// Fetch repository metadata
    pub async fn fetch_repository(&self, repo: &RepoRef) -> Result<RepoMetadata, DomainError> {
        let url = format!("{}/repos/{}/{}", self.base_url, repo.owner, repo.repo);
        debug!(url = %url, "Fetching repository metadata");

        let value = self.http.get_json(&url, self.headers()).await?;

        serde_json::from_value(value).map_err(|e| {
            DomainError::upstream("github", format!("Unexpected repository payload: {}", e))
        })
    }

    /// Fetch and decode the repository README.
    ///
    /// Returns `Ok(None)` when GitHub reports the repository has no README
    /// content; transport and decode failures are errors for the caller to
    /// downgrade as it sees fit.
    pub async fn fetch_readme(&self, repo: &RepoRef) -> Result<Option<String>, DomainError> {
        let url = format!("{}/repos/{}/{}/readme", self.base_url, repo.owner, repo.repo);
        debug!(url = %url, "Fetching repository README");

        let value = self.http.get_json(&url, self.headers()).await?;
        let response: ReadmeResponse = serde_json::from_value(value).map_err(|e| {
            DomainError::upstream("github", format!("Unexpected README payload: {}", e))
        })?;

        let Some(content) = response.content else {
            return Ok(None);
        };

        // The API wraps the base64 payload in newlines; the decoder is strict
        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| {
                DomainError::upstream("github", format!("Failed to decode README: {}", e))
            })?;

        let text = String::from_utf8(bytes).map_err(|e| {
            DomainError::upstream("github", format!("README is not valid UTF-8: {}", e))
        })?;

        Ok(Some(text))
    }
}
