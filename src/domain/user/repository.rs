//! User repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for user records
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Look a user up by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
