//! Application state for shared services

use std::sync::Arc;

use super::dashboard::DashboardViews;
use crate::domain::{ApiKeyRepository, Notifier};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dashboard view state, one per client
    pub views: DashboardViews,
    pub repository: Arc<dyn ApiKeyRepository>,
    pub notifier: Arc<dyn Notifier>,
    /// Cookie carrying the validated-key marker
    pub cookie_name: String,
}

impl AppState {
    /// Create new application state around a store gateway and notifier
    pub fn new(
        repository: Arc<dyn ApiKeyRepository>,
        notifier: Arc<dyn Notifier>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            views: DashboardViews::new(repository.clone(), notifier.clone()),
            repository,
            notifier,
            cookie_name: cookie_name.into(),
        }
    }
}
