//! Session commands backed by the marker file
//!
//! `validate` opens the gate, `protected` checks it and `logout` closes it.

use std::sync::Arc;

use anyhow::bail;
use tracing::info;

use crate::domain::{MarkerStore, Notifier};
use crate::infrastructure::api_key::ApiKeyManager;
use crate::infrastructure::notification::TracingNotifier;
use crate::infrastructure::session::{FileMarkerStore, SessionGate, NO_VALID_KEY_MESSAGE};
use crate::infrastructure::storage::create_api_key_repository;

/// Validate `key` against the configured store
pub async fn validate(key: &str) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let repository = create_api_key_repository(&config.storage).await?;
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier::new());
    let manager = ApiKeyManager::new(repository, notifier.clone());
    let gate = SessionGate::new(FileMarkerStore::new(&config.session.marker_path));

    validate_into(&manager, &gate, notifier.as_ref(), key).await
}

/// Check the marker file
pub async fn protected() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let gate = SessionGate::new(FileMarkerStore::new(&config.session.marker_path));

    check_gate(&gate, &TracingNotifier::new())
}

/// Remove the marker file
pub async fn logout() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let gate = SessionGate::new(FileMarkerStore::new(&config.session.marker_path));

    gate.clear()?;
    info!("Session marker cleared");
    println!("Logged out");

    Ok(())
}

pub(crate) async fn validate_into<S: MarkerStore>(
    manager: &ApiKeyManager,
    gate: &SessionGate<S>,
    notifier: &dyn Notifier,
    key: &str,
) -> anyhow::Result<()> {
    let key = key.trim();

    if key.is_empty() {
        notifier.error("Please enter an API key");
        bail!("Please enter an API key");
    }

    if !manager.validate(key).await {
        notifier.error("Invalid API key");
        bail!("Invalid API key");
    }

    gate.record_validated(key)?;
    notifier.success("Valid API key, /protected can be accessed");
    println!("Valid API key");

    Ok(())
}

pub(crate) fn check_gate<S: MarkerStore>(
    gate: &SessionGate<S>,
    notifier: &dyn Notifier,
) -> anyhow::Result<()> {
    if !gate.enter(notifier) {
        bail!(NO_VALID_KEY_MESSAGE);
    }

    println!("Protected Page");
    println!("This is a protected page that can only be accessed with a valid API key.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::mock::{record, MockApiKeyRepository};
    use crate::domain::notification::mock::RecordingNotifier;
    use crate::domain::{ApiKeyStatus, NotificationLevel};
    use crate::infrastructure::session::InMemoryMarkerStore;

    const ACTIVE: &str = "tvly-aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const INACTIVE: &str = "tvly-bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn manager(notifier: Arc<RecordingNotifier>) -> ApiKeyManager {
        let repository = MockApiKeyRepository::with_records(vec![
            record("1", "on", ACTIVE, ApiKeyStatus::Active),
            record("2", "off", INACTIVE, ApiKeyStatus::Inactive),
        ]);
        ApiKeyManager::new(Arc::new(repository), notifier)
    }

    #[tokio::test]
    async fn test_validate_records_active_key() {
        let notifier = Arc::new(RecordingNotifier::new());
        let manager = manager(notifier.clone());
        let gate = SessionGate::new(InMemoryMarkerStore::new());

        validate_into(&manager, &gate, notifier.as_ref(), ACTIVE)
            .await
            .unwrap();

        assert_eq!(gate.store().read().unwrap().as_deref(), Some(ACTIVE));
        assert_eq!(
            notifier.last(),
            Some((
                NotificationLevel::Success,
                "Valid API key, /protected can be accessed".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_validate_rejects_inactive_key() {
        let notifier = Arc::new(RecordingNotifier::new());
        let manager = manager(notifier.clone());
        let gate = SessionGate::new(InMemoryMarkerStore::new());

        let result = validate_into(&manager, &gate, notifier.as_ref(), INACTIVE).await;

        assert!(result.is_err());
        assert!(!gate.is_authorized());
    }

    #[tokio::test]
    async fn test_validate_keeps_previous_marker_on_failure() {
        let notifier = Arc::new(RecordingNotifier::new());
        let manager = manager(notifier.clone());
        let gate = SessionGate::new(InMemoryMarkerStore::with_value(ACTIVE));

        let result = validate_into(&manager, &gate, notifier.as_ref(), "tvly-unknown").await;

        assert!(result.is_err());
        assert_eq!(gate.store().read().unwrap().as_deref(), Some(ACTIVE));
    }

    #[test]
    fn test_check_gate() {
        let notifier = RecordingNotifier::new();

        let closed = SessionGate::new(InMemoryMarkerStore::new());
        let err = check_gate(&closed, &notifier).unwrap_err();
        assert_eq!(err.to_string(), NO_VALID_KEY_MESSAGE);

        let open = SessionGate::new(InMemoryMarkerStore::with_value(ACTIVE));
        assert!(check_gate(&open, &notifier).is_ok());
    }
}
