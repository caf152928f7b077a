//! API key generation

use rand::Rng;

use crate::domain::api_key::{KEY_ALPHABET, KEY_PREFIX, KEY_RANDOM_LENGTH};

/// Generator for `tvly-` keys.
///
/// Each character after the prefix is sampled uniformly, with replacement,
/// from `[a-z0-9]` using `thread_rng`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiKeyGenerator;

impl ApiKeyGenerator {
    /// Generate a new key
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let mut key = String::with_capacity(KEY_PREFIX.len() + KEY_RANDOM_LENGTH);
        key.push_str(KEY_PREFIX);

        for _ in 0..KEY_RANDOM_LENGTH {
            let idx = rng.gen_range(0..KEY_ALPHABET.len());
            key.push(KEY_ALPHABET[idx] as char);
        }

        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::validate_key_format;
    use std::collections::HashSet;

    #[test]
    fn test_generate_key_format() {
        let generator = ApiKeyGenerator::default();

        for _ in 0..200 {
            let key = generator.generate();
            assert_eq!(key.len(), 37);
            assert!(key.starts_with("tvly-"));
            assert!(validate_key_format(&key).is_ok(), "bad key {}", key);
        }
    }

    #[test]
    fn test_key_uniqueness() {
        let generator = ApiKeyGenerator::default();
        let keys: HashSet<String> = (0..100).map(|_| generator.generate()).collect();

        assert_eq!(keys.len(), 100);
    }

    #[test]
    fn test_alphabet_coverage() {
        let generator = ApiKeyGenerator::default();
        let seen: HashSet<char> = (0..500)
            .flat_map(|_| generator.generate()[5..].chars().collect::<Vec<_>>())
            .collect();

        // 16000 draws over 36 symbols; every symbol shows up
        assert_eq!(seen.len(), KEY_ALPHABET.len());
    }
}
