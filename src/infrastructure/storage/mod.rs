//! Storage infrastructure - backend selection and PostgreSQL pooling

pub mod migrations;

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::StorageSettings;
use crate::domain::{ApiKeyRepository, DomainError};
use crate::infrastructure::api_key::{InMemoryApiKeyRepository, PostgresApiKeyRepository};

pub use migrations::{run_migrations, Migration, Migrator, PostgresMigrator};

/// Available storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Connect a pool using the configured limits
pub async fn connect_postgres(settings: &StorageSettings) -> Result<PgPool, DomainError> {
    let url = settings.database_url.as_deref().ok_or_else(|| {
        DomainError::configuration("storage.database_url is required for the postgres backend")
    })?;

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .connect(url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Build the key store gateway for the configured backend
pub async fn create_api_key_repository(
    settings: &StorageSettings,
) -> Result<Arc<dyn ApiKeyRepository>, DomainError> {
    let backend = StorageType::from_str(&settings.backend).ok_or_else(|| {
        DomainError::configuration(format!("Unknown storage backend: {}", settings.backend))
    })?;

    info!("Storage backend: {:?}", backend);

    match backend {
        StorageType::InMemory => Ok(Arc::new(InMemoryApiKeyRepository::new())),
        StorageType::Postgres => {
            info!("Connecting to PostgreSQL...");
            let pool = connect_postgres(settings).await?;
            run_migrations(&pool).await?;
            info!("PostgreSQL connection established");
            Ok(Arc::new(PostgresApiKeyRepository::new(pool)))
        }
    }
}
