//! API key identifier generation
//!
//! Generated identifiers follow `dandi_<type>_<8 uppercase alphanumeric>`.
//! The identifier is the bearer secret; collisions are not pre-checked and
//! the store's primary-key constraint is the only uniqueness backstop.

use rand::Rng;

use crate::domain::api_key::{ApiKeyId, KeyType};
use crate::domain::DomainError;

const RANDOM_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const RANDOM_LENGTH: usize = 8;

/// Generator for key identifiers
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    prefix: String,
}

impl KeyGenerator {
    /// Create a generator with a custom leading prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Generate a fresh identifier for the given key type
    pub fn generate(&self, key_type: KeyType) -> Result<ApiKeyId, DomainError> {
        let mut rng = rand::thread_rng();
        let random: String = (0..RANDOM_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..RANDOM_CHARSET.len());
                RANDOM_CHARSET[idx] as char
            })
            .collect();

        let id = format!("{}_{}_{}", self.prefix, key_type.as_str(), random);

        ApiKeyId::new(id).map_err(|e| DomainError::internal(format!("Generated invalid id: {}", e)))
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new("dandi")
    }
}
