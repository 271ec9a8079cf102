//! Structured README digestion through the OpenAI chat completions API

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::github::ReadmeDigest;
use crate::domain::DomainError;
use crate::infrastructure::http::HttpApi;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Client producing a `ReadmeDigest` from raw README text
#[derive(Debug)]
pub struct OpenAiReadmeSummarizer {
    http: Arc<dyn HttpApi>,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiReadmeSummarizer {
    pub fn new(http: Arc<dyn HttpApi>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn prompt(readme: Option<&str>) -> String {
        format!(
            "Summarize this GitHub repository from the following README file content:\n\
             ---START README---\n{}\n---END README---",
            readme.unwrap_or("No README content.")
        )
    }

    /// Ask the model for a structured digest of the README.
    ///
    /// The response format is pinned to a strict JSON schema and temperature
    /// zero so the output deserializes deterministically.
    pub async fn digest(&self, readme: Option<&str>) -> Result<ReadmeDigest, DomainError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, "Requesting README digest");

        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                {"role": "user", "content": Self::prompt(readme)}
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "summarize_repo",
                    "strict": true,
                    "schema": {
                        "type": "object",
                        "properties": {
                            "summary": {
                                "type": "string",
                                "description": "A concise summary of what the repository does"
                            },
                            "cool_facts": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "Interesting facts drawn from the README"
                            }
                        },
                        "required": ["summary", "cool_facts"],
                        "additionalProperties": false
                    }
                }
            }
        });

        let auth = format!("Bearer {}", self.api_key);
        let response = self
            .http
            .post_json(&url, vec![("Authorization", &auth)], &body)
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                DomainError::upstream("openai", "Completion response carried no content")
            })?;

        serde_json::from_str(content).map_err(|e| {
            DomainError::upstream("openai", format!("Digest did not match schema: {}", e))
        })
    }
}
