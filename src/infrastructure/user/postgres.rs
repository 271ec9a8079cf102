//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of `UserRepository`
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensure the backing table exists
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT,
                image TEXT,
                provider TEXT NOT NULL,
                provider_account_id TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

fn row_to_user(row: &PgRow) -> User {
    let created_at: DateTime<Utc> = row.get("created_at");

    User::from_parts(
        row.get("id"),
        row.get("email"),
        row.get("name"),
        row.get("image"),
        row.get("provider"),
        row.get("provider_account_id"),
        created_at,
    )
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, image, provider, provider_account_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        Ok(row.map(|row| row_to_user(&row)))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, image, provider, provider_account_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id())
        .bind(user.email())
        .bind(user.name())
        .bind(user.image())
        .bind(user.provider())
        .bind(user.provider_account_id())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create user: {}", e)))?;

        Ok(user)
    }
}
