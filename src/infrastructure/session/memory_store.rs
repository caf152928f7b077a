//! In-memory marker store

use std::sync::RwLock;

use crate::domain::{DomainError, MarkerStore};

/// Marker slot held in process memory
#[derive(Debug, Default)]
pub struct InMemoryMarkerStore {
    value: RwLock<Option<String>>,
}

impl InMemoryMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a marker
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(value.into())),
        }
    }
}

impl MarkerStore for InMemoryMarkerStore {
    fn read(&self) -> Result<Option<String>, DomainError> {
        self.value
            .read()
            .map(|v| v.clone())
            .map_err(|_| DomainError::internal("Session marker lock poisoned"))
    }

    fn write(&self, value: &str) -> Result<(), DomainError> {
        let mut slot = self
            .value
            .write()
            .map_err(|_| DomainError::internal("Session marker lock poisoned"))?;
        *slot = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), DomainError> {
        let mut slot = self
            .value
            .write()
            .map_err(|_| DomainError::internal("Session marker lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}
