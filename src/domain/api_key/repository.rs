//! API Key repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{ApiKey, ApiKeyId, ApiKeyUpdate};
use crate::domain::DomainError;

/// Repository trait for the key store
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// Get a key by its id
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError>;

    /// List all keys, newest first
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError>;

    /// Insert a new key; the store's primary-key constraint is the only
    /// uniqueness guarantee
    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError>;

    /// Apply a sparse update, returning the updated record, or `None` when
    /// no record with that id exists
    async fn update(
        &self,
        id: &ApiKeyId,
        update: &ApiKeyUpdate,
    ) -> Result<Option<ApiKey>, DomainError>;

    /// Delete by id; returns the number of rows removed (zero is not an error)
    async fn delete(&self, id: &ApiKeyId) -> Result<u64, DomainError>;
}
