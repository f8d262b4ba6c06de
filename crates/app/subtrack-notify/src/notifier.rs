use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, error};

use crate::{Notification, Severity};

pub const DEFAULT_LIFE: Duration = Duration::from_millis(3000);

const CHANNEL_CAPACITY: usize = 100;

/// An error that may carry a message meant for the user, such as the `error`
/// field of an API response body.
pub trait ErrorDetail: std::fmt::Display {
    fn detail(&self) -> Option<&str> {
        None
    }
}

/// Fan-out of status messages to whichever views are listening.
///
/// Cloning is cheap and every clone publishes to the same subscribers.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
    life: Duration,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_life(DEFAULT_LIFE)
    }

    pub fn with_life(life: Duration) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx, life }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn show(&self, severity: Severity, summary: impl Into<String>, detail: impl Into<String>) {
        let notification = Notification {
            severity,
            summary: summary.into(),
            detail: detail.into(),
            life: self.life,
        };

        if self.tx.send(notification).is_err() {
            debug!("No notification subscribers; message dropped");
        }
    }

    pub fn success(&self, summary: impl Into<String>, detail: impl Into<String>) {
        self.show(Severity::Success, summary, detail);
    }

    pub fn info(&self, summary: impl Into<String>, detail: impl Into<String>) {
        self.show(Severity::Info, summary, detail);
    }

    pub fn error(&self, summary: impl Into<String>, detail: impl Into<String>) {
        self.show(Severity::Error, summary, detail);
    }

    /// Logs `err` and shows a single error message. The server-supplied
    /// detail wins over the generic `message` when present.
    pub fn handle_error(&self, message: &str, err: &dyn ErrorDetail) {
        error!("{}: {}", message, err);
        let detail = err.detail().unwrap_or(message);
        self.error("Error", detail);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
