//! API key lifecycle manager
//!
//! Owns the local collection of keys for one dashboard view and keeps it in
//! step with the store. Local state is only patched after the store has
//! confirmed a mutation, so a rejected write never shows up locally.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::api_key::{
    mask, validate_key_name, ApiKeyId, ApiKeyRecord, ApiKeyRepository, NewApiKey,
};
use crate::domain::Notifier;

use super::generator::ApiKeyGenerator;

/// Lifecycle manager for the keys shown in one view
#[derive(Debug)]
pub struct ApiKeyManager {
    repository: Arc<dyn ApiKeyRepository>,
    notifier: Arc<dyn Notifier>,
    generator: ApiKeyGenerator,
    keys: Vec<ApiKeyRecord>,
    loading: Arc<AtomicBool>,
}

impl ApiKeyManager {
    /// Create a manager with an empty local collection. It reports loading
    /// until the first refresh settles.
    pub fn new(repository: Arc<dyn ApiKeyRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
            generator: ApiKeyGenerator::default(),
            keys: Vec::new(),
            loading: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Local collection, newest first
    pub fn keys(&self) -> &[ApiKeyRecord] {
        &self.keys
    }

    /// Local record by id
    pub fn get(&self, id: &ApiKeyId) -> Option<&ApiKeyRecord> {
        self.keys.iter().find(|k| k.id() == id)
    }

    /// Whether a refresh is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    #[cfg(test)]
    fn loading_flag(&self) -> Arc<AtomicBool> {
        self.loading.clone()
    }

    /// Replace the local collection with the store's contents.
    ///
    /// On failure the previous collection is kept.
    pub async fn refresh(&mut self) -> bool {
        self.loading.store(true, Ordering::Release);

        let result = self.repository.list().await;

        self.loading.store(false, Ordering::Release);

        match result {
            Ok(keys) => {
                self.keys = keys;
                true
            }
            Err(e) => {
                error!("Error fetching API keys: {}", e);
                self.notifier.error("Failed to fetch API keys");
                false
            }
        }
    }

    /// Generate a key, store it under `name` and prepend it locally
    pub async fn create(&mut self, name: &str) -> bool {
        let name = match validate_key_name(name) {
            Ok(name) => name,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return false;
            }
        };

        let key = self.generator.generate();

        match self.repository.insert(NewApiKey::new(name, key)).await {
            Ok(record) => {
                info!(
                    id = %record.id(),
                    key = %mask(record.key(), false),
                    "API key created"
                );
                self.keys.insert(0, record);
                self.notifier.success("API key created successfully");
                true
            }
            Err(e) => {
                error!("Error creating API key: {}", e);
                self.notifier.error("Failed to create API key");
                false
            }
        }
    }

    /// Rename a key; only `name` changes
    pub async fn rename(&mut self, id: &ApiKeyId, name: &str) -> bool {
        let name = match validate_key_name(name) {
            Ok(name) => name,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return false;
            }
        };

        match self.repository.update_name(id, name).await {
            Ok(true) => {
                if let Some(record) = self.keys.iter_mut().find(|k| k.id() == id) {
                    record.set_name(name);
                }
                info!(id = %id, "API key renamed");
                self.notifier.success("API key updated successfully");
                true
            }
            Ok(false) => {
                error!("Error updating API key: '{}' not found", id);
                self.notifier.error("Failed to update API key");
                false
            }
            Err(e) => {
                error!("Error updating API key: {}", e);
                self.notifier.error("Failed to update API key");
                false
            }
        }
    }

    /// Delete a key from the store and the local collection
    pub async fn remove(&mut self, id: &ApiKeyId) -> bool {
        match self.repository.delete(id).await {
            Ok(true) => {
                self.keys.retain(|k| k.id() != id);
                info!(id = %id, "API key deleted");
                self.notifier.success("API key deleted successfully");
                true
            }
            Ok(false) => {
                error!("Error deleting API key: '{}' not found", id);
                self.notifier.error("Failed to delete API key");
                false
            }
            Err(e) => {
                error!("Error deleting API key: {}", e);
                self.notifier.error("Failed to delete API key");
                false
            }
        }
    }

    /// Flip a key between active and inactive.
    ///
    /// The current status is read from the local collection, so unknown ids
    /// fail without a store call.
    pub async fn toggle_status(&mut self, id: &ApiKeyId) -> bool {
        let Some(current) = self.get(id).map(|k| k.status()) else {
            error!("Error updating API key status: '{}' not in view", id);
            self.notifier.error("Failed to update API key status");
            return false;
        };

        let new_status = current.toggled();

        match self.repository.update_status(id, new_status).await {
            Ok(true) => {
                if let Some(record) = self.keys.iter_mut().find(|k| k.id() == id) {
                    record.set_status(new_status);
                }
                info!(id = %id, status = %new_status, "API key status changed");

                if new_status.is_usable() {
                    self.notifier.success("API key activated");
                } else {
                    self.notifier.success("API key deactivated");
                }
                true
            }
            Ok(false) => {
                error!("Error updating API key status: '{}' not found", id);
                self.notifier.error("Failed to update API key status");
                false
            }
            Err(e) => {
                error!("Error updating API key status: {}", e);
                self.notifier.error("Failed to update API key status");
                false
            }
        }
    }

    /// Whether `key` belongs to an active record. Leaves local state and
    /// notifications alone.
    pub async fn validate(&self, key: &str) -> bool {
        self.repository.find_active_by_key(key).await
    }
}
