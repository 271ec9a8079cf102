//! Repository summarization endpoints
//!
//! Both endpoints require a valid API key in the request body. The key check
//! happens before anything is fetched upstream.

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::domain::github::{ReadmeDigest, RepoSummary};

use super::state::AppState;
use super::types::{ApiError, Json};

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub key: Option<String>,
    pub repo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub summary: RepoSummary,
}

#[derive(Debug, Deserialize)]
pub struct ReadmeDigestRequest {
    pub key: Option<String>,
    pub readme: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReadmeDigestResponse {
    pub success: bool,
    pub summary: ReadmeDigest,
}

async fn require_valid_key(state: &AppState, key: &Option<String>) -> Result<(), ApiError> {
    let Some(candidate) = key else {
        return Err(ApiError::bad_request("API key is required"));
    };

    if state.api_keys.validate(candidate).await.is_none() {
        return Err(ApiError::unauthorized("Invalid API key"));
    }

    Ok(())
}

/// POST /summarize
pub async fn summarize_repo(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    require_valid_key(&state, &request.key).await?;

    let Some(repo_url) = request.repo.as_deref() else {
        return Err(ApiError::bad_request("GitHub repository URL is required"));
    };

    let summary = state.summarizer.summarize(repo_url).await?;
    Ok(Json(SummarizeResponse {
        success: true,
        summary,
    }))
}

/// POST /summarize/readme
///
/// 503 unless a completion service is configured.
pub async fn digest_readme(
    State(state): State<AppState>,
    Json(request): Json<ReadmeDigestRequest>,
) -> Result<Json<ReadmeDigestResponse>, ApiError> {
    require_valid_key(&state, &request.key).await?;

    let Some(digester) = &state.readme_digest else {
        return Err(ApiError::unavailable(
            "README summarization is not configured",
        ));
    };

    let summary = digester.digest(request.readme.as_deref()).await?;
    Ok(Json(ReadmeDigestResponse {
        success: true,
        summary,
    }))
}
