//! Key lifecycle service
//!
//! High-level create / list / update / delete operations plus the
//! fail-closed validation gateway used by downstream consumers.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::api_key::{
    validate_key_name, ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyUpdate, KeyType,
};
use crate::domain::DomainError;

use super::generator::KeyGenerator;

/// Public projection of a validated key.
///
/// Deliberately omits `usage` and `created_at`; consumers of the validation
/// gateway only learn what they need to display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidatedKey {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub key_type: KeyType,
}

impl From<&ApiKey> for ValidatedKey {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id().as_str().to_string(),
            name: key.name().to_string(),
            key_type: key.key_type(),
        }
    }
}

/// Service owning the key lifecycle against the key store
#[derive(Debug)]
pub struct ApiKeyService {
    repository: Arc<dyn ApiKeyRepository>,
    generator: KeyGenerator,
}

impl ApiKeyService {
    /// Create a new service over the given repository
    pub fn new(repository: Arc<dyn ApiKeyRepository>) -> Self {
        Self {
            repository,
            generator: KeyGenerator::default(),
        }
    }

    /// Create with a custom generator
    pub fn with_generator(mut self, generator: KeyGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// List all keys, newest first
    pub async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        self.repository.list().await
    }

    /// Create a new key.
    ///
    /// The name is trimmed and must be non-empty; validation failures never
    /// reach the store. Identifier collisions are not pre-checked, so a
    /// duplicate insert surfaces as the store's own error.
    pub async fn create(&self, name: &str, key_type: KeyType) -> Result<ApiKey, DomainError> {
        let name = name.trim();
        validate_key_name(name).map_err(|e| DomainError::validation(e.to_string()))?;

        let id = self.generator.generate(key_type)?;
        info!(id = %id, name = %name, "Creating API key");

        let api_key = ApiKey::new(id, name, key_type);
        self.repository.create(api_key).await
    }

    /// Apply a sparse update to an existing key.
    ///
    /// Only non-empty-after-trim names are applied. An update carrying no
    /// recognized change is a no-op that returns the current record without
    /// touching the store.
    pub async fn update(
        &self,
        id: &str,
        name: Option<&str>,
        key_type: Option<KeyType>,
    ) -> Result<ApiKey, DomainError> {
        let Ok(id) = ApiKeyId::new(id) else {
            return Err(DomainError::not_found(format!("API key '{}' not found", id)));
        };

        let update = ApiKeyUpdate {
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
            key_type,
        };

        if update.is_empty() {
            debug!(id = %id, "Empty patch, returning current record");
            return self
                .repository
                .get(&id)
                .await?
                .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)));
        }

        info!(id = %id, "Updating API key");
        self.repository
            .update(&id, &update)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))
    }

    /// Delete a key by id.
    ///
    /// Idempotent in effect: deleting an unknown id still succeeds because
    /// the store reports no error on a zero-row delete.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let Ok(id) = ApiKeyId::new(id) else {
            // Malformed ids cannot exist in the store
            return Ok(());
        };

        let removed = self.repository.delete(&id).await?;
        info!(id = %id, removed, "Deleted API key");
        Ok(())
    }

    /// Validation gateway: a key is valid iff a record with that exact id
    /// exists. Malformed candidates and store failures both resolve to
    /// invalid (fail-closed); the distinction is not surfaced to callers.
    pub async fn validate(&self, candidate: &str) -> Option<ValidatedKey> {
        let candidate = candidate.trim();

        let Ok(id) = ApiKeyId::new(candidate) else {
            debug!("Candidate key rejected by format check");
            return None;
        };

        match self.repository.get(&id).await {
            Ok(Some(key)) => Some(ValidatedKey::from(&key)),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Key store unavailable during validation, failing closed");
                None
            }
        }
    }
}
