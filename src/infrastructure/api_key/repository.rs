//! In-memory API key repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKeyId, ApiKeyRecord, ApiKeyRepository, ApiKeyStatus, NewApiKey};
use crate::domain::DomainError;

/// In-memory implementation of ApiKeyRepository
#[derive(Debug)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<HashMap<ApiKeyId, ApiKeyRecord>>>,
    key_index: Arc<RwLock<HashMap<String, ApiKeyId>>>,
}

impl InMemoryApiKeyRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(HashMap::new())),
            key_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryApiKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, DomainError> {
        let keys = self.keys.read().await;

        let mut result: Vec<ApiKeyRecord> = keys.values().cloned().collect();
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(result)
    }

    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKeyRecord, DomainError> {
        let mut keys = self.keys.write().await;
        let mut key_index = self.key_index.write().await;

        if key_index.contains_key(&new_key.key) {
            return Err(DomainError::storage(
                "duplicate key value violates unique constraint on api_keys.key",
            ));
        }

        let id = ApiKeyId::new(uuid::Uuid::new_v4().to_string());
        let record = ApiKeyRecord::new(id.clone(), new_key, Utc::now());

        key_index.insert(record.key().to_string(), id.clone());
        keys.insert(id, record.clone());

        Ok(record)
    }

    async fn update_name(&self, id: &ApiKeyId, name: &str) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;

        match keys.get_mut(id) {
            Some(record) => {
                record.set_name(name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_status(
        &self,
        id: &ApiKeyId,
        status: ApiKeyStatus,
    ) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;

        match keys.get_mut(id) {
            Some(record) => {
                record.set_status(status);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;
        let mut key_index = self.key_index.write().await;

        if let Some(record) = keys.remove(id) {
            key_index.remove(record.key());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, DomainError> {
        let key_index = self.key_index.read().await;

        if let Some(id) = key_index.get(key) {
            let keys = self.keys.read().await;
            Ok(keys.get(id).cloned())
        } else {
            Ok(None)
        }
    }
}
