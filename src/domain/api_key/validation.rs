//! API key validation utilities

use thiserror::Error;

/// Prefix carried by every generated key
pub const KEY_PREFIX: &str = "tvly-";

/// Number of random characters after the prefix
pub const KEY_RANDOM_LENGTH: usize = 32;

/// Symbols the random part is drawn from
pub const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Errors that can occur during API key validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("Please enter a key name")]
    EmptyName,

    #[error("API key must start with '{0}'")]
    MissingPrefix(&'static str),

    #[error("API key must have {expected} characters after the prefix, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("API key contains invalid character: '{0}'")]
    InvalidCharacter(char),
}

/// Validate and normalize a key name.
///
/// Surrounding whitespace is dropped; what remains must be non-empty.
pub fn validate_key_name(name: &str) -> Result<&str, ApiKeyValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    Ok(trimmed)
}

/// Check that a key has the generated shape: `tvly-` + 32 of `[a-z0-9]`
pub fn validate_key_format(key: &str) -> Result<(), ApiKeyValidationError> {
    let random = key
        .strip_prefix(KEY_PREFIX)
        .ok_or(ApiKeyValidationError::MissingPrefix(KEY_PREFIX))?;

    let actual = random.chars().count();

    if actual != KEY_RANDOM_LENGTH {
        return Err(ApiKeyValidationError::InvalidLength {
            expected: KEY_RANDOM_LENGTH,
            actual,
        });
    }

    match random.chars().find(|c| !c.is_ascii() || !KEY_ALPHABET.contains(&(*c as u8))) {
        Some(c) => Err(ApiKeyValidationError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(validate_key_name("Test Key"), Ok("Test Key"));
        assert_eq!(validate_key_name("  padded  "), Ok("padded"));
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_key_name(""), Err(ApiKeyValidationError::EmptyName));
        assert_eq!(validate_key_name("   "), Err(ApiKeyValidationError::EmptyName));
    }

    #[test]
    fn test_valid_key_format() {
        assert!(validate_key_format("tvly-abcdefghijklmnopqrstuvwxyz012345").is_ok());
    }

    #[test]
    fn test_key_without_prefix() {
        assert_eq!(
            validate_key_format("abcdefghijklmnopqrstuvwxyz0123456789"),
            Err(ApiKeyValidationError::MissingPrefix(KEY_PREFIX))
        );
    }

    #[test]
    fn test_key_with_wrong_length() {
        assert_eq!(
            validate_key_format("tvly-abc"),
            Err(ApiKeyValidationError::InvalidLength {
                expected: 32,
                actual: 3
            })
        );
    }

    #[test]
    fn test_key_with_uppercase() {
        assert_eq!(
            validate_key_format("tvly-Abcdefghijklmnopqrstuvwxyz012345"),
            Err(ApiKeyValidationError::InvalidCharacter('A'))
        );
    }
}
