//! API key store gateway trait

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

use super::entity::{ApiKeyId, ApiKeyRecord, ApiKeyStatus, NewApiKey};
use crate::domain::DomainError;

/// Gateway to the table holding API key records.
///
/// Every method is a single round trip. Mutations report `Ok(false)` when no
/// row matched the id; callers do not distinguish that from other failures.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// All records, newest `created_at` first
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, DomainError>;

    /// Insert a record; the store assigns `id` and `created_at`
    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKeyRecord, DomainError>;

    /// Change only the name of a record
    async fn update_name(&self, id: &ApiKeyId, name: &str) -> Result<bool, DomainError>;

    /// Change only the status of a record
    async fn update_status(&self, id: &ApiKeyId, status: ApiKeyStatus)
        -> Result<bool, DomainError>;

    /// Delete a record
    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError>;

    /// Look a record up by its secret value
    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, DomainError>;

    /// Whether an active record holds this key. Any error counts as `false`.
    async fn find_active_by_key(&self, key: &str) -> bool {
        match self.find_by_key(key).await {
            Ok(record) => record.is_some_and(|r| r.is_active()),
            Err(e) => {
                debug!("Active key lookup failed: {}", e);
                false
            }
        }
    }

    /// Whether any record holds this key, regardless of status. Any error
    /// counts as `false`.
    async fn key_exists(&self, key: &str) -> bool {
        match self.find_by_key(key).await {
            Ok(record) => record.is_some(),
            Err(e) => {
                debug!("Key lookup failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use tokio::sync::{Notify, RwLock};

    /// Mock API key repository for testing
    #[derive(Debug, Default)]
    pub struct MockApiKeyRepository {
        keys: Arc<RwLock<Vec<ApiKeyRecord>>>,
        should_fail: Arc<RwLock<bool>>,
        next_id: Arc<RwLock<u64>>,
        list_gate: Option<Arc<Notify>>,
    }

    impl MockApiKeyRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a repository holding the given records
        pub fn with_records(records: Vec<ApiKeyRecord>) -> Self {
            Self {
                keys: Arc::new(RwLock::new(records)),
                ..Self::default()
            }
        }

        /// Make every `list` call wait for a permit on `gate`
        pub fn with_list_gate(mut self, gate: Arc<Notify>) -> Self {
            self.list_gate = Some(gate);
            self
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Snapshot of the stored rows
        pub async fn stored(&self) -> Vec<ApiKeyRecord> {
            self.keys.read().await.clone()
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    /// Build a stored record with a fixed id, for seeding
    pub fn record(id: &str, name: &str, key: &str, status: ApiKeyStatus) -> ApiKeyRecord {
        let mut new_key = NewApiKey::new(name, key);
        new_key.status = status;
        ApiKeyRecord::new(ApiKeyId::new(id), new_key, Utc::now())
    }

    #[async_trait]
    impl ApiKeyRepository for MockApiKeyRepository {
        async fn list(&self) -> Result<Vec<ApiKeyRecord>, DomainError> {
            if let Some(gate) = &self.list_gate {
                gate.notified().await;
            }
            self.check_should_fail().await?;
            let mut keys = self.keys.read().await.clone();
            keys.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
            Ok(keys)
        }

        async fn insert(&self, new_key: NewApiKey) -> Result<ApiKeyRecord, DomainError> {
            self.check_should_fail().await?;
            let mut next_id = self.next_id.write().await;
            *next_id += 1;

            let mut keys = self.keys.write().await;
            // Strictly increasing timestamps keep the newest-first order stable
            let created_at = Utc::now() + Duration::milliseconds(*next_id as i64);
            let record = ApiKeyRecord::new(
                ApiKeyId::new(format!("mock-{}", next_id)),
                new_key,
                created_at,
            );
            keys.push(record.clone());
            Ok(record)
        }

        async fn update_name(&self, id: &ApiKeyId, name: &str) -> Result<bool, DomainError> {
            self.check_should_fail().await?;
            let mut keys = self.keys.write().await;

            match keys.iter_mut().find(|k| k.id() == id) {
                Some(key) => {
                    key.set_name(name);
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
            self.check_should_fail().await?;
            let mut keys = self.keys.write().await;

            match keys.iter_mut().find(|k| k.id() == id) {
                Some(key) => {
                    key.set_status(status);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
            self.check_should_fail().await?;
            let mut keys = self.keys.write().await;
            let before = keys.len();
            keys.retain(|k| k.id() != id);
            Ok(keys.len() < before)
        }

        async fn find_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, DomainError> {
            self.check_should_fail().await?;
            let keys = self.keys.read().await;
            Ok(keys.iter().find(|k| k.key() == key).cloned())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const KEY: &str = "tvly-abcdefghijklmnopqrstuvwxyz012345";

        #[tokio::test]
        async fn test_find_active_by_key() {
            let repo = MockApiKeyRepository::with_records(vec![
                record("1", "Active", KEY, ApiKeyStatus::Active),
                record("2", "Inactive", "tvly-inactive", ApiKeyStatus::Inactive),
            ]);

            assert!(repo.find_active_by_key(KEY).await);
            assert!(!repo.find_active_by_key("tvly-inactive").await);
            assert!(!repo.find_active_by_key("tvly-unknown").await);
        }

        #[tokio::test]
        async fn test_key_exists_ignores_status() {
            let repo = MockApiKeyRepository::with_records(vec![record(
                "2",
                "Inactive",
                "tvly-inactive",
                ApiKeyStatus::Inactive,
            )]);

            assert!(repo.key_exists("tvly-inactive").await);
            assert!(!repo.key_exists("tvly-unknown").await);
        }

        #[tokio::test]
        async fn test_lookups_swallow_errors() {
            let repo = MockApiKeyRepository::with_records(vec![record(
                "1",
                "Active",
                KEY,
                ApiKeyStatus::Active,
            )]);
            repo.set_should_fail(true).await;

            assert!(!repo.find_active_by_key(KEY).await);
            assert!(!repo.key_exists(KEY).await);
        }

        #[tokio::test]
        async fn test_list_newest_first() {
            let repo = MockApiKeyRepository::new();
            repo.insert(NewApiKey::new("first", "tvly-1")).await.unwrap();
            repo.insert(NewApiKey::new("second", "tvly-2")).await.unwrap();

            let names: Vec<String> = repo
                .list()
                .await
                .unwrap()
                .iter()
                .map(|k| k.name().to_string())
                .collect();
            assert_eq!(names, vec!["second", "first"]);
        }

        #[tokio::test]
        async fn test_mutations_report_missing_rows() {
            let repo = MockApiKeyRepository::new();
            let id = ApiKeyId::new("missing");

            assert!(!repo.update_name(&id, "x").await.unwrap());
            assert!(!repo.update_status(&id, ApiKeyStatus::Inactive).await.unwrap());
            assert!(!repo.delete(&id).await.unwrap());
        }
    }
}
