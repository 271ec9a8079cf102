//! PostgreSQL key repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyUpdate, KeyType};
use crate::domain::DomainError;

/// PostgreSQL implementation of `ApiKeyRepository`
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensure the backing table exists
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS api_keys (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                key_type TEXT NOT NULL,
                usage BIGINT NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create api_keys table: {}", e)))?;

        Ok(())
    }
}

fn row_to_key(row: &PgRow) -> Result<ApiKey, DomainError> {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let key_type: String = row.get("key_type");
    let usage: i64 = row.get("usage");
    let created_at: DateTime<Utc> = row.get("created_at");

    let id = ApiKeyId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid stored key id: {}", e)))?;
    let key_type: KeyType = key_type
        .parse()
        .map_err(|e| DomainError::storage(format!("Invalid stored key type: {}", e)))?;

    Ok(ApiKey::from_parts(id, name, key_type, usage, created_at))
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, key_type, usage, created_at
            FROM api_keys
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get key: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_key(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, key_type, usage, created_at
            FROM api_keys
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list keys: {}", e)))?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            keys.push(row_to_key(row)?);
        }

        Ok(keys)
    }

    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (id, name, key_type, usage, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(api_key.id().as_str())
        .bind(api_key.name())
        .bind(api_key.key_type().as_str())
        .bind(api_key.usage())
        .bind(api_key.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create key: {}", e)))?;

        Ok(api_key)
    }

    async fn update(
        &self,
        id: &ApiKeyId,
        update: &ApiKeyUpdate,
    ) -> Result<Option<ApiKey>, DomainError> {
        // Single round trip: COALESCE keeps columns the caller did not set
        let row = sqlx::query(
            r#"
            UPDATE api_keys
            SET name = COALESCE($2, name),
                key_type = COALESCE($3, key_type)
            WHERE id = $1
            RETURNING id, name, key_type, usage, created_at
            "#,
        )
        .bind(id.as_str())
        .bind(update.name.as_deref())
        .bind(update.key_type.map(|t| t.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update key: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_key(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete key: {}", e)))?;

        Ok(result.rows_affected())
    }
}
