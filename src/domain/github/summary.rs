//! Summary objects returned to dashboard clients

use serde::{Deserialize, Serialize};

/// Flat repository summary assembled from GitHub metadata and README.
///
/// Optional upstream fields map to `null` or an empty array, never to an
/// error. Timestamps are passed through as the upstream RFC 3339 strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub default_branch: Option<String>,
    pub license: Option<String>,
    pub readme: Option<String>,
}

/// Structured natural-language digest of a README produced by the
/// completion service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadmeDigest {
    /// A concise, 2-3 sentence summary of the repository
    pub summary: String,
    /// 3-5 interesting facts drawn from the README
    pub cool_facts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = RepoSummary {
            name: "tokio".to_string(),
            full_name: "tokio-rs/tokio".to_string(),
            description: None,
            url: "https://github.com/tokio-rs/tokio".to_string(),
            stars: 1,
            forks: 2,
            watchers: 3,
            open_issues: 4,
            language: Some("Rust".to_string()),
            topics: vec![],
            created_at: None,
            updated_at: None,
            default_branch: Some("master".to_string()),
            license: None,
            readme: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["fullName"], "tokio-rs/tokio");
        assert_eq!(json["openIssues"], 4);
        assert_eq!(json["defaultBranch"], "master");
        assert!(json["description"].is_null());
        assert!(json["readme"].is_null());
        assert_eq!(json["topics"], serde_json::json!([]));
    }

    #[test]
    fn test_digest_field_names() {
        let digest = ReadmeDigest {
            summary: "An async runtime.".to_string(),
            cool_facts: vec!["Used by many crates".to_string()],
        };

        let json = serde_json::to_value(&digest).unwrap();
        assert!(json.get("summary").is_some());
        assert!(json.get("cool_facts").is_some());
    }
}
