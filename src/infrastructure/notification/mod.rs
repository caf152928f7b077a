//! Notification sinks

use tracing::{info, warn};

use crate::domain::{NotificationLevel, Notifier};

/// Notifier that emits each message as a log event
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Success => info!(notification = "success", "{}", message),
            NotificationLevel::Error => warn!(notification = "error", "{}", message),
        }
    }
}
