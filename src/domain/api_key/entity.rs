//! API Key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_key_id, ApiKeyValidationError};

/// API Key identifier - alphanumeric plus underscores, max 64 characters.
///
/// The identifier doubles as the bearer secret: clients present the id
/// string itself when calling authorized endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKeyId(String);

impl ApiKeyId {
    /// Create a new ApiKeyId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ApiKeyValidationError> {
        let id = id.into();
        validate_key_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ApiKeyId {
    type Error = ApiKeyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiKeyId> for String {
    fn from(id: ApiKeyId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Environment tag of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Development key
    #[default]
    Dev,
    /// Production key
    Prod,
}

impl KeyType {
    /// Lowercase tag used inside generated identifiers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for KeyType {
    type Err = ApiKeyValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(ApiKeyValidationError::UnknownKeyType(other.to_string())),
        }
    }
}

/// API key record as held by the key store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique identifier, also the bearer secret; never regenerated
    id: ApiKeyId,
    /// Human-readable label
    name: String,
    /// Environment tag
    #[serde(rename = "type")]
    key_type: KeyType,
    /// Usage counter; initialized to zero, no increment path is defined
    usage: i64,
    /// Creation timestamp, immutable
    created_at: DateTime<Utc>,
}

impl ApiKey {
    /// Create a new API key record with a zeroed usage counter
    pub fn new(id: ApiKeyId, name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            id,
            name: name.into(),
            key_type,
            usage: 0,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate a record from stored columns
    pub fn from_parts(
        id: ApiKeyId,
        name: impl Into<String>,
        key_type: KeyType,
        usage: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            key_type,
            usage,
            created_at,
        }
    }

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn usage(&self) -> i64 {
        self.usage
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_key_type(&mut self, key_type: KeyType) {
        self.key_type = key_type;
    }
}

/// Sparse update applied to an existing key; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeyUpdate {
    pub name: Option<String>,
    pub key_type: Option<KeyType>,
}

impl ApiKeyUpdate {
    /// True when the update would not change any field
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.key_type.is_none()
    }

    /// Apply the update to a record in place
    pub fn apply(&self, key: &mut ApiKey) {
        if let Some(ref name) = self.name {
            key.set_name(name.clone());
        }
        if let Some(key_type) = self.key_type {
            key.set_key_type(key_type);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_id_roundtrip() {
        let id = ApiKeyId::new("dandi_dev_AB12CD34").unwrap();
        assert_eq!(id.as_str(), "dandi_dev_AB12CD34");
        assert_eq!(String::from(id.clone()), "dandi_dev_AB12CD34");
        assert_eq!(id.to_string(), "dandi_dev_AB12CD34");
    }

    #[test]
    fn test_api_key_id_rejects_invalid() {
        assert!(ApiKeyId::new("").is_err());
        assert!(ApiKeyId::new("has spaces").is_err());
    }

    #[test]
    fn test_key_type_serde_tag() {
        assert_eq!(serde_json::to_string(&KeyType::Dev).unwrap(), "\"dev\"");
        assert_eq!(serde_json::to_string(&KeyType::Prod).unwrap(), "\"prod\"");

        let parsed: KeyType = serde_json::from_str("\"prod\"").unwrap();
        assert_eq!(parsed, KeyType::Prod);
        assert!(serde_json::from_str::<KeyType>("\"staging\"").is_err());
    }

    #[test]
    fn test_new_key_defaults() {
        let id = ApiKeyId::new("dandi_dev_AB12CD34").unwrap();
        let key = ApiKey::new(id, "default", KeyType::Dev);

        assert_eq!(key.usage(), 0);
        assert_eq!(key.key_type(), KeyType::Dev);
    }

    #[test]
    fn test_serialized_field_names() {
        let id = ApiKeyId::new("dandi_prod_AB12CD34").unwrap();
        let key = ApiKey::new(id, "prod key", KeyType::Prod);

        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["id"], "dandi_prod_AB12CD34");
        assert_eq!(json["type"], "prod");
        assert_eq!(json["usage"], 0);
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn test_update_apply_and_is_empty() {
        let id = ApiKeyId::new("dandi_dev_AB12CD34").unwrap();
        let mut key = ApiKey::new(id, "before", KeyType::Dev);

        let empty = ApiKeyUpdate::default();
        assert!(empty.is_empty());

        let update = ApiKeyUpdate {
            name: Some("after".to_string()),
            key_type: Some(KeyType::Prod),
        };
        assert!(!update.is_empty());

        update.apply(&mut key);
        assert_eq!(key.name(), "after");
        assert_eq!(key.key_type(), KeyType::Prod);
    }
}
