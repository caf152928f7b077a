//! Page gate backed by the validated-key marker

use tracing::{debug, warn};

use crate::domain::{DomainError, MarkerStore, Notifier};

/// Message surfaced when the gate is closed
pub const NO_VALID_KEY_MESSAGE: &str = "No valid API key found";

/// Gate that opens once a validated key has been recorded.
///
/// This is a presence check on a client-held value, not an access control
/// boundary. Nothing expires or re-validates the marker.
#[derive(Debug)]
pub struct SessionGate<S: MarkerStore> {
    store: S,
}

impl<S: MarkerStore> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Remember `key` as the last validated key, replacing any earlier one
    pub fn record_validated(&self, key: &str) -> Result<(), DomainError> {
        debug!("Recording validated key marker");
        self.store.write(key)
    }

    /// Whether a non-empty marker is present. Unreadable markers count as
    /// absent.
    pub fn is_authorized(&self) -> bool {
        match self.store.read() {
            Ok(marker) => marker.is_some_and(|m| !m.is_empty()),
            Err(e) => {
                warn!("Failed to read session marker: {}", e);
                false
            }
        }
    }

    /// Check the gate on page entry, surfacing an error notification when
    /// it is closed
    pub fn enter(&self, notifier: &dyn Notifier) -> bool {
        let authorized = self.is_authorized();

        if !authorized {
            notifier.error(NO_VALID_KEY_MESSAGE);
        }

        authorized
    }

    /// Drop the marker, closing the gate
    pub fn clear(&self) -> Result<(), DomainError> {
        self.store.clear()
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
