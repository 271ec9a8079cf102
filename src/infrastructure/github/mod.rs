//! GitHub API integration

mod client;

pub use client::{GitHubClient, RepoLicense, RepoMetadata, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
