//! API key domain - the key store's entity and access contract

mod entity;
mod repository;
mod validation;

pub use entity::{ApiKey, ApiKeyId, ApiKeyUpdate, KeyType};
pub use repository::ApiKeyRepository;
pub use validation::{
    validate_key_id, validate_key_name, ApiKeyValidationError, MAX_KEY_ID_LENGTH,
    MAX_KEY_NAME_LENGTH,
};

#[cfg(test)]
pub use repository::mock;
