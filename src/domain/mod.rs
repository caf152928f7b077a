//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod error;
pub mod notification;
pub mod session;

pub use api_key::{
    mask, ApiKeyId, ApiKeyRecord, ApiKeyRepository, ApiKeyStatus, ApiKeyValidationError,
    NewApiKey, VisibleKeys,
};
pub use error::DomainError;
pub use notification::{NotificationLevel, Notifier};
pub use session::{MarkerStore, MARKER_NAME};
