//! PostgreSQL API key repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::api_key::{ApiKeyId, ApiKeyRecord, ApiKeyRepository, ApiKeyStatus, NewApiKey};
use crate::domain::DomainError;

const SELECT_COLUMNS: &str = "id, name, key, created_at, status, usage";

/// PostgreSQL implementation of ApiKeyRepository over the `api_keys` table
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM api_keys ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list API keys: {}", e)))?;

        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            records.push(row_to_record(&row)?);
        }

        Ok(records)
    }

    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKeyRecord, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO api_keys (name, key, status, usage)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&new_key.name)
        .bind(&new_key.key)
        .bind(new_key.status.as_str())
        .bind(new_key.usage)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create API key: {}", e)))?;

        row_to_record(&row)
    }

    async fn update_name(&self, id: &ApiKeyId, name: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE api_keys SET name = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update API key: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_status(
        &self,
        id: &ApiKeyId,
        status: ApiKeyStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE api_keys SET status = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to update API key status: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete API key: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM api_keys WHERE key = $1",
            SELECT_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up API key: {}", e)))?;

        row.map(|row| row_to_record(&row)).transpose()
    }
}

fn row_to_record(row: &PgRow) -> Result<ApiKeyRecord, DomainError> {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let key: String = row.get("key");
    let created_at: DateTime<Utc> = row.get("created_at");
    let status_str: String = row.get("status");
    let usage: i64 = row.get("usage");

    let status = status_str
        .parse::<ApiKeyStatus>()
        .map_err(DomainError::storage)?;

    let new_key = NewApiKey {
        name,
        key,
        status,
        usage,
    };

    Ok(ApiKeyRecord::new(ApiKeyId::new(id), new_key, created_at))
}
