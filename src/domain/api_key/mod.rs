//! API key domain: records, masking, validation and the store gateway

mod entity;
mod masking;
mod repository;
mod validation;

pub use entity::{ApiKeyId, ApiKeyRecord, ApiKeyStatus, NewApiKey};
pub use masking::{mask, VisibleKeys, MASK_CHAR, MASK_LENGTH};
pub use repository::ApiKeyRepository;
pub use validation::{
    validate_key_format, validate_key_name, ApiKeyValidationError, KEY_ALPHABET, KEY_PREFIX,
    KEY_RANDOM_LENGTH,
};

#[cfg(test)]
pub use repository::mock;
