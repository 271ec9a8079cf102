//! Validation rules for API key identifiers and labels

use thiserror::Error;

/// Maximum length of an API key identifier
pub const MAX_KEY_ID_LENGTH: usize = 64;

/// Maximum length of an API key name
pub const MAX_KEY_NAME_LENGTH: usize = 128;

/// Validation errors for API key fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiKeyValidationError {
    #[error("API key id cannot be empty")]
    EmptyId,

    #[error("API key id cannot exceed {MAX_KEY_ID_LENGTH} characters")]
    IdTooLong,

    #[error("API key id contains invalid character '{0}'")]
    InvalidIdCharacter(char),

    #[error("API key name cannot be empty")]
    EmptyName,

    #[error("API key name cannot exceed {MAX_KEY_NAME_LENGTH} characters")]
    NameTooLong,

    #[error("Unknown key type '{0}', expected 'dev' or 'prod'")]
    UnknownKeyType(String),
}

/// Validate an API key identifier.
///
/// Identifiers are alphanumeric plus underscores, which covers the generated
/// `dandi_<type>_<random>` format. Candidate strings presented for validation
/// go through the same check; anything that fails it cannot possibly be a
/// stored key.
pub fn validate_key_id(id: &str) -> Result<(), ApiKeyValidationError> {
    if id.is_empty() {
        return Err(ApiKeyValidationError::EmptyId);
    }

    if id.len() > MAX_KEY_ID_LENGTH {
        return Err(ApiKeyValidationError::IdTooLong);
    }

    if let Some(c) = id.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        return Err(ApiKeyValidationError::InvalidIdCharacter(c));
    }

    Ok(())
}

/// Validate a human-readable key name (expected to be trimmed already)
pub fn validate_key_name(name: &str) -> Result<(), ApiKeyValidationError> {
    if name.is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    if name.chars().count() > MAX_KEY_NAME_LENGTH {
        return Err(ApiKeyValidationError::NameTooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key_id() {
        assert!(validate_key_id("dandi_dev_AB12CD34").is_ok());
        assert!(validate_key_id("dandi_prod_ZZZZ9999").is_ok());
    }

    #[test]
    fn test_empty_key_id() {
        assert_eq!(validate_key_id(""), Err(ApiKeyValidationError::EmptyId));
    }

    #[test]
    fn test_key_id_too_long() {
        let id = "a".repeat(MAX_KEY_ID_LENGTH + 1);
        assert_eq!(validate_key_id(&id), Err(ApiKeyValidationError::IdTooLong));
    }

    #[test]
    fn test_key_id_invalid_character() {
        assert_eq!(
            validate_key_id("dandi dev"),
            Err(ApiKeyValidationError::InvalidIdCharacter(' '))
        );
        assert_eq!(
            validate_key_id("dandi-dev"),
            Err(ApiKeyValidationError::InvalidIdCharacter('-'))
        );
    }

    #[test]
    fn test_key_name() {
        assert!(validate_key_name("My default key").is_ok());
        assert_eq!(validate_key_name(""), Err(ApiKeyValidationError::EmptyName));

        let long = "n".repeat(MAX_KEY_NAME_LENGTH + 1);
        assert_eq!(
            validate_key_name(&long),
            Err(ApiKeyValidationError::NameTooLong)
        );
    }
}
