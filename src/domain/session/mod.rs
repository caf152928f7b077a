//! Client-local session marker

use std::fmt::Debug;

use crate::domain::DomainError;

/// Name of the single marker slot
pub const MARKER_NAME: &str = "validApiKey";

/// One named slot holding the last successfully validated key.
///
/// Reads and writes are synchronous; there is no expiry.
pub trait MarkerStore: Send + Sync + Debug {
    /// Current marker value, if any
    fn read(&self) -> Result<Option<String>, DomainError>;

    /// Overwrite the marker
    fn write(&self, value: &str) -> Result<(), DomainError>;

    /// Remove the marker
    fn clear(&self) -> Result<(), DomainError>;
}
