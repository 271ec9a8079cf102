//! Repository summarization
//!
//! Fans out to GitHub for metadata and README concurrently and assembles the
//! flat summary the dashboard renders. Metadata is load-bearing; the README
//! is best-effort.

use tracing::{debug, warn};

use crate::domain::github::{RepoRef, RepoSummary};
use crate::domain::DomainError;
use crate::infrastructure::github::GitHubClient;

/// README text longer than this is cut and marked with an ellipsis
pub const README_MAX_CHARS: usize = 2000;

/// Service assembling repository summaries
#[derive(Debug)]
pub struct RepoSummarizer {
    github: GitHubClient,
}

impl RepoSummarizer {
    pub fn new(github: GitHubClient) -> Self {
        Self { github }
    }

    /// Summarize the repository behind a user-supplied URL.
    ///
    /// A metadata failure means the repository is unusable and maps to not
    /// found; a README failure only nulls the `readme` field.
    pub async fn summarize(&self, repo_url: &str) -> Result<RepoSummary, DomainError> {
        let repo = RepoRef::parse(repo_url)?;
        debug!(repo = %repo, "Summarizing repository");

        let (metadata, readme) = tokio::join!(
            self.github.fetch_repository(&repo),
            self.github.fetch_readme(&repo)
        );

        let metadata = metadata.map_err(|e| {
            warn!(repo = %repo, error = %e, "Repository metadata fetch failed");
            DomainError::not_found("GitHub repository does not exist or is private")
        })?;

        let readme = match readme {
            Ok(content) => content,
            Err(e) => {
                warn!(repo = %repo, error = %e, "README fetch failed, omitting readme");
                None
            }
        };

        Ok(RepoSummary {
            name: metadata.name,
            full_name: metadata.full_name,
            description: metadata.description,
            url: metadata.html_url,
            stars: metadata.stargazers_count,
            forks: metadata.forks_count,
            watchers: metadata.watchers_count,
            open_issues: metadata.open_issues_count,
            language: metadata.language,
            topics: metadata.topics,
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
            default_branch: metadata.default_branch,
            license: metadata.license.and_then(|l| l.name),
            readme: readme.map(truncate_readme),
        })
    }
}

/// Cut README text to a display-friendly length, counting characters rather
/// than bytes so multi-byte text never splits mid-codepoint
fn truncate_readme(text: String) -> String {
    if text.chars().count() <= README_MAX_CHARS {
        return text;
    }

    let mut cut: String = text.chars().take(README_MAX_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::mock::MockHttpApi;

    use std::sync::Arc;

    use base64::Engine;
    use serde_json::json;

    const REPO_URL: &str = "https://api.github.com/repos/octo/widget";
    const README_URL: &str = "https://api.github.com/repos/octo/widget/readme";

    fn metadata_payload() -> serde_json::Value {
        json!({
            "name": "widget",
            "full_name": "octo/widget",
            "description": "A widget",
            "html_url": "https://github.com/octo/widget",
            "stargazers_count": 10,
            "forks_count": 2,
            "watchers_count": 10,
            "open_issues_count": 1,
            "language": "Rust",
            "topics": ["widgets"],
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "default_branch": "main",
            "license": {"name": "Apache License 2.0"}
        })
    }

    fn readme_payload(text: &str) -> serde_json::Value {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        json!({"content": encoded, "encoding": "base64"})
    }

    fn summarizer(http: MockHttpApi) -> RepoSummarizer {
        RepoSummarizer::new(GitHubClient::new(Arc::new(http)))
    }

    #[tokio::test]
    async fn test_summarize_full_repository() {
        let http = MockHttpApi::new()
            .with_response(REPO_URL, metadata_payload())
            .with_response(README_URL, readme_payload("# Widget\nDoes things."));

        let summary = summarizer(http)
            .summarize("https://github.com/octo/widget")
            .await
            .unwrap();

        assert_eq!(summary.full_name, "octo/widget");
        assert_eq!(summary.stars, 10);
        assert_eq!(summary.license.as_deref(), Some("Apache License 2.0"));
        assert_eq!(summary.readme.as_deref(), Some("# Widget\nDoes things."));
    }

    #[tokio::test]
    async fn test_invalid_url_is_validation_error() {
        let result = summarizer(MockHttpApi::new())
            .summarize("https://example.com/not/github")
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_metadata_failure_is_not_found() {
        let http = MockHttpApi::new()
            .with_error(REPO_URL, "HTTP 404: Not Found")
            .with_response(README_URL, readme_payload("orphan readme"));

        let result = summarizer(http)
            .summarize("https://github.com/octo/widget")
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_readme_failure_nulls_readme_only() {
        let http = MockHttpApi::new()
            .with_response(REPO_URL, metadata_payload())
            .with_error(README_URL, "HTTP 404: Not Found");

        let summary = summarizer(http)
            .summarize("https://github.com/octo/widget")
            .await
            .unwrap();

        assert_eq!(summary.full_name, "octo/widget");
        assert!(summary.readme.is_none());
    }

    #[tokio::test]
    async fn test_long_readme_truncated_with_ellipsis() {
        let long = "x".repeat(README_MAX_CHARS + 500);
        let http = MockHttpApi::new()
            .with_response(REPO_URL, metadata_payload())
            .with_response(README_URL, readme_payload(&long));

        let summary = summarizer(http)
            .summarize("https://github.com/octo/widget")
            .await
            .unwrap();

        let readme = summary.readme.unwrap();
        assert_eq!(readme.chars().count(), README_MAX_CHARS + 3);
        assert!(readme.ends_with("..."));
    }

    #[tokio::test]
    async fn test_short_readme_untouched() {
        let http = MockHttpApi::new()
            .with_response(REPO_URL, metadata_payload())
            .with_response(README_URL, readme_payload("short"));

        let summary = summarizer(http)
            .summarize("https://github.com/octo/widget")
            .await
            .unwrap();

        assert_eq!(summary.readme.as_deref(), Some("short"));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "é".repeat(README_MAX_CHARS + 1);
        let cut = truncate_readme(text);
        assert_eq!(cut.chars().count(), README_MAX_CHARS + 3);
    }
}
