//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::api_key::ApiKeyService;
use crate::infrastructure::llm::OpenAiReadmeSummarizer;
use crate::infrastructure::summarizer::RepoSummarizer;
use crate::infrastructure::user::UserService;

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub api_keys: Arc<ApiKeyService>,
    pub users: Arc<UserService>,
    pub summarizer: Arc<RepoSummarizer>,
    /// Present only when an OpenAI API key is configured
    pub readme_digest: Option<Arc<OpenAiReadmeSummarizer>>,
}
