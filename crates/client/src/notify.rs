//! Transient user-facing notifications (toasts).

use serde::Serialize;
use tokio::sync::broadcast;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
}

impl Notification {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            title: title.into(),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Default capacity of the notification channel.
pub const CHANNEL_CAPACITY: usize = 64;

/// Fan-out of notifications to any number of listeners.
///
/// Sending never fails: with no subscribers the notification is dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn send(&self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!(title = %notification.title, "Error notification");
        } else {
            tracing::debug!(title = %notification.title, "Notification");
        }
        // No receivers is fine.
        let _ = self.sender.send(notification);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_notifications() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();
        notifier.send(Notification::error("Failed to add chapter"));

        let received = rx.recv().await.unwrap();
        assert!(received.is_error());
        assert_eq!(received.title, "Failed to add chapter");
    }

    #[test]
    fn send_without_subscribers_does_not_panic() {
        Notifier::default().send(Notification::info("Chapter added"));
    }
}
