//! User-visible notification sink

use std::fmt::Debug;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Sink for the short success/error messages shown to the user
pub trait Notifier: Send + Sync + Debug {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Notifier that remembers everything it was told
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        messages: Mutex<Vec<(NotificationLevel, String)>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
            self.messages.lock().unwrap().clone()
        }

        pub fn last(&self) -> Option<(NotificationLevel, String)> {
            self.messages.lock().unwrap().last().cloned()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, level: NotificationLevel, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push((level, message.to_string()));
        }
    }
}
