//! User provisioning on OAuth sign-in
//!
//! Provisioning must never block a sign-in: every failure is logged and
//! reported as `Skipped`, and the caller treats all outcomes as success.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::user::{SignInIdentity, User, UserRepository};

/// What happened during provisioning; serialized into the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionOutcome {
    /// First sign-in, record written
    Created,
    /// Record already present, nothing written
    Existing,
    /// Store unavailable; sign-in proceeds without a record
    Skipped,
}

/// Service provisioning user records on sign-in
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Ensure a user record exists for the signed-in identity (fail-open).
    ///
    /// Two round trips without a transaction: a concurrent first sign-in can
    /// race the insert, in which case the unique constraint rejects the
    /// second write and the outcome degrades to `Skipped`.
    pub async fn provision(&self, identity: &SignInIdentity) -> ProvisionOutcome {
        match self.repository.get_by_email(&identity.email).await {
            Ok(Some(_)) => ProvisionOutcome::Existing,
            Ok(None) => {
                let user = User::from_identity(Uuid::new_v4().to_string(), identity);
                match self.repository.create(user).await {
                    Ok(user) => {
                        info!(email = %user.email(), provider = %user.provider(), "Provisioned new user");
                        ProvisionOutcome::Created
                    }
                    Err(e) => {
                        warn!(error = %e, email = %identity.email, "Failed to provision user, continuing sign-in");
                        ProvisionOutcome::Skipped
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, email = %identity.email, "User lookup failed, continuing sign-in");
                ProvisionOutcome::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::InMemoryUserRepository;

    use async_trait::async_trait;
    use std::fmt;

    use crate::domain::DomainError;

    struct FailingUserRepository;

    impl fmt::Debug for FailingUserRepository {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("FailingUserRepository")
        }
    }

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn get_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        async fn create(&self, _user: User) -> Result<User, DomainError> {
            Err(DomainError::storage("connection refused"))
        }
    }

    fn identity() -> SignInIdentity {
        SignInIdentity {
            email: "dev@example.com".to_string(),
            name: Some("Dev User".to_string()),
            image: None,
            provider: "google".to_string(),
            provider_account_id: "1234567890".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_sign_in_creates_record() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = UserService::new(repo.clone());

        assert_eq!(service.provision(&identity()).await, ProvisionOutcome::Created);

        let stored = repo.get_by_email("dev@example.com").await.unwrap().unwrap();
        assert_eq!(stored.provider(), "google");
        assert!(!stored.id().is_empty());
    }

    #[tokio::test]
    async fn test_repeat_sign_in_is_existing() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = UserService::new(repo.clone());

        service.provision(&identity()).await;
        let first_id = repo
            .get_by_email("dev@example.com")
            .await
            .unwrap()
            .unwrap()
            .id()
            .to_string();

        assert_eq!(service.provision(&identity()).await, ProvisionOutcome::Existing);

        // The existing record is untouched
        let second_id = repo
            .get_by_email("dev@example.com")
            .await
            .unwrap()
            .unwrap()
            .id()
            .to_string();
        assert_eq!(first_id, second_id);
    }

    #[tokio::test]
    async fn test_store_failure_never_propagates() {
        let service = UserService::new(Arc::new(FailingUserRepository));
        assert_eq!(service.provision(&identity()).await, ProvisionOutcome::Skipped);
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_value(ProvisionOutcome::Created).unwrap(),
            "created"
        );
        assert_eq!(
            serde_json::to_value(ProvisionOutcome::Skipped).unwrap(),
            "skipped"
        );
    }
}
