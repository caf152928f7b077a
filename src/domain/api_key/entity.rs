//! API key record and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a key record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(String);

impl ApiKeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKeyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ApiKeyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyStatus {
    /// Key is accepted by validation
    #[default]
    Active,
    /// Key is kept but rejected by validation
    Inactive,
}

impl ApiKeyStatus {
    /// Check if the key is usable
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// The opposite status, used when toggling
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    /// Column value as stored in the `api_keys` table
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for ApiKeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApiKeyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("Unknown API key status: {}", other)),
        }
    }
}

/// Fields supplied by the caller when inserting a record.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiKey {
    pub name: String,
    pub key: String,
    pub status: ApiKeyStatus,
    pub usage: i64,
}

impl NewApiKey {
    /// A fresh record: active, no usage
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            status: ApiKeyStatus::Active,
            usage: 0,
        }
    }
}

/// One managed API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    id: ApiKeyId,
    name: String,
    key: String,
    created_at: DateTime<Utc>,
    status: ApiKeyStatus,
    usage: i64,
}

impl ApiKeyRecord {
    /// Materialize a stored row
    pub fn new(
        id: ApiKeyId,
        new_key: NewApiKey,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: new_key.name,
            key: new_key.key,
            created_at,
            status: new_key.status,
            usage: new_key.usage,
        }
    }

    // Getters

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> ApiKeyStatus {
        self.status
    }

    pub fn usage(&self) -> i64 {
        self.usage
    }

    /// Check if the key would pass validation
    pub fn is_active(&self) -> bool {
        self.status.is_usable()
    }

    // Mutators. `key`, `id`, `created_at` and `usage` never change here.

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_status(&mut self, status: ApiKeyStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> ApiKeyRecord {
        ApiKeyRecord::new(
            ApiKeyId::new("1"),
            NewApiKey::new("Test Key", "tvly-abcdefghijklmnopqrstuvwxyz012345"),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_api_key_defaults() {
        let new_key = NewApiKey::new("Test Key", "tvly-x");
        assert_eq!(new_key.status, ApiKeyStatus::Active);
        assert_eq!(new_key.usage, 0);
    }

    #[test]
    fn test_status_toggle_is_involution() {
        assert_eq!(ApiKeyStatus::Active.toggled(), ApiKeyStatus::Inactive);
        assert_eq!(ApiKeyStatus::Inactive.toggled(), ApiKeyStatus::Active);
        assert_eq!(ApiKeyStatus::Active.toggled().toggled(), ApiKeyStatus::Active);
    }

    #[test]
    fn test_status_round_trips_through_column_value() {
        for status in [ApiKeyStatus::Active, ApiKeyStatus::Inactive] {
            assert_eq!(status.as_str().parse::<ApiKeyStatus>(), Ok(status));
        }
        assert!("revoked".parse::<ApiKeyStatus>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ApiKeyStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }

    #[test]
    fn test_record_mutators_touch_only_their_field() {
        let mut record = create_test_record();
        let before = record.clone();

        record.set_name("Renamed");
        assert_eq!(record.name(), "Renamed");
        assert_eq!(record.key(), before.key());
        assert_eq!(record.status(), before.status());

        record.set_status(ApiKeyStatus::Inactive);
        assert!(!record.is_active());
        assert_eq!(record.name(), "Renamed");
        assert_eq!(record.usage(), 0);
        assert_eq!(record.created_at(), before.created_at());
    }
}
