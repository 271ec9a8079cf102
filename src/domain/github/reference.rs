//! Parsing of user-supplied GitHub repository URLs

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

static REPO_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com/([^/\s]+)/([^/\s]+)").expect("valid repo URL pattern"));

/// An `owner/repo` pair extracted from a repository URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse a repository URL of the shape `<host>/<owner>/<repo>[.git]`.
    ///
    /// A trailing `.git` suffix is stripped from the repository name, so
    /// clone URLs and browser URLs resolve to the same pair.
    pub fn parse(url: &str) -> Result<Self, DomainError> {
        let captures = REPO_URL_PATTERN
            .captures(url)
            .ok_or_else(|| DomainError::validation("Invalid GitHub repo URL"))?;

        let owner = captures[1].to_string();
        let repo = captures[2].trim_end_matches(".git").to_string();

        if repo.is_empty() {
            return Err(DomainError::validation("Invalid GitHub repo URL"));
        }

        Ok(Self { owner, repo })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
