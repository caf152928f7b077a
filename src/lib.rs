//! API Key Dashboard
//!
//! Issues, lists, renames, toggles and revokes `tvly-` API keys, and answers
//! whether a presented key exists. Includes:
//! - An HTTP dashboard and validation endpoint
//! - A playground that unlocks a protected page once a key validates
//! - In-memory and PostgreSQL key stores

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::notification::TracingNotifier;
use infrastructure::storage::create_api_key_repository;
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = create_api_key_repository(&config.storage).await?;
    let notifier = Arc::new(TracingNotifier::new());

    info!(
        backend = %config.storage.backend,
        cookie = %config.session.cookie_name,
        "Application state initialized"
    );

    Ok(AppState::new(
        repository,
        notifier,
        config.session.cookie_name.clone(),
    ))
}
