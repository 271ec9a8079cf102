//! In-memory key repository for tests and the local storage backend

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyUpdate};
use crate::domain::DomainError;

/// In-memory implementation of `ApiKeyRepository`
#[derive(Debug, Default)]
pub struct InMemoryApiKeyRepository {
    keys: RwLock<HashMap<String, ApiKey>>,
}

impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.get(id.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        let keys = self.keys.read().await;

        let mut result: Vec<ApiKey> = keys.values().cloned().collect();
        // Tie-break on id so equal timestamps don't expose HashMap order
        result.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });
        Ok(result)
    }

    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;
        let id = api_key.id().as_str().to_string();

        // Mirrors the store-level uniqueness constraint
        if keys.contains_key(&id) {
            return Err(DomainError::storage(format!(
                "duplicate key value '{}' violates unique constraint",
                id
            )));
        }

        keys.insert(id, api_key.clone());
        Ok(api_key)
    }

    async fn update(
        &self,
        id: &ApiKeyId,
        update: &ApiKeyUpdate,
    ) -> Result<Option<ApiKey>, DomainError> {
        let mut keys = self.keys.write().await;

        match keys.get_mut(id.as_str()) {
            Some(key) => {
                update.apply(key);
                Ok(Some(key.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<u64, DomainError> {
        let mut keys = self.keys.write().await;
        Ok(if keys.remove(id.as_str()).is_some() {
            1
        } else {
            0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::KeyType;
    use chrono::{Duration, Utc};

    fn test_key(id: &str, name: &str) -> ApiKey {
        ApiKey::new(ApiKeyId::new(id).unwrap(), name, KeyType::Dev)
    }

    fn key_created_at(id: &str, name: &str, created_at: chrono::DateTime<Utc>) -> ApiKey {
        ApiKey::from_parts(ApiKeyId::new(id).unwrap(), name, KeyType::Dev, 0, created_at)
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let repo = InMemoryApiKeyRepository::new();
        let key = test_key("dandi_dev_AAAA0001", "first");

        repo.create(key.clone()).await.unwrap();
        assert!(repo.get(key.id()).await.unwrap().is_some());

        assert_eq!(repo.delete(key.id()).await.unwrap(), 1);
        assert!(repo.get(key.id()).await.unwrap().is_none());
        assert_eq!(repo.delete(key.id()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryApiKeyRepository::new();
        let base = Utc::now();

        for (id, name, age_secs) in [
            ("dandi_dev_AAAA0001", "oldest", 2),
            ("dandi_dev_AAAA0002", "middle", 1),
            ("dandi_dev_AAAA0003", "newest", 0),
        ] {
            let key = key_created_at(id, name, base - Duration::seconds(age_secs));
            repo.create(key).await.unwrap();
        }

        let listed = repo.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_list_equal_timestamps_order_by_id() {
        let repo = InMemoryApiKeyRepository::new();
        let now = Utc::now();

        // Inserted out of order, all sharing the same created_at
        for id in ["dandi_dev_CCCC0003", "dandi_dev_AAAA0001", "dandi_dev_BBBB0002"] {
            repo.create(key_created_at(id, "same tick", now)).await.unwrap();
        }

        let listed = repo.list().await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|k| k.id().as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "dandi_dev_AAAA0001",
                "dandi_dev_BBBB0002",
                "dandi_dev_CCCC0003"
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let repo = InMemoryApiKeyRepository::new();
        let key = test_key("dandi_dev_AAAA0001", "first");

        repo.create(key.clone()).await.unwrap();
        assert!(matches!(
            repo.create(key).await,
            Err(DomainError::Storage { .. })
        ));
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = InMemoryApiKeyRepository::new();
        let key = test_key("dandi_dev_AAAA0001", "before");
        repo.create(key.clone()).await.unwrap();

        let update = ApiKeyUpdate {
            name: Some("after".to_string()),
            key_type: None,
        };

        let updated = repo.update(key.id(), &update).await.unwrap().unwrap();
        assert_eq!(updated.name(), "after");
        assert_eq!(updated.key_type(), KeyType::Dev);
        assert_eq!(updated.created_at(), key.created_at());
    }
}
