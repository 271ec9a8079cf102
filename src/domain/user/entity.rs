//! User entity written on first OAuth sign-in

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity details handed over by the OAuth provider after sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct SignInIdentity {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub provider: String,
    pub provider_account_id: String,
}

/// Stored user record; written once per identity, looked up by email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    provider: String,
    provider_account_id: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a record for a first-time sign-in
    pub fn from_identity(id: impl Into<String>, identity: &SignInIdentity) -> Self {
        Self {
            id: id.into(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            image: identity.image.clone(),
            provider: identity.provider.clone(),
            provider_account_id: identity.provider_account_id.clone(),
            created_at: Utc::now(),
        }
    }

    /// Rehydrate a record from stored columns
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: String,
        email: String,
        name: Option<String>,
        image: Option<String>,
        provider: String,
        provider_account_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            image,
            provider,
            provider_account_id,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn provider_account_id(&self) -> &str {
        &self.provider_account_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> SignInIdentity {
        SignInIdentity {
            email: "dev@example.com".to_string(),
            name: Some("Dev User".to_string()),
            image: None,
            provider: "google".to_string(),
            provider_account_id: "1234567890".to_string(),
        }
    }

    #[test]
    fn test_from_identity() {
        let user = User::from_identity("user-1", &identity());

        assert_eq!(user.id(), "user-1");
        assert_eq!(user.email(), "dev@example.com");
        assert_eq!(user.name(), Some("Dev User"));
        assert_eq!(user.image(), None);
        assert_eq!(user.provider(), "google");
    }

    #[test]
    fn test_identity_optional_fields_default() {
        let json = r#"{
            "email": "dev@example.com",
            "provider": "google",
            "provider_account_id": "42"
        }"#;

        let identity: SignInIdentity = serde_json::from_str(json).unwrap();
        assert!(identity.name.is_none());
        assert!(identity.image.is_none());
    }
}
