mod notification;
mod notifier;

pub use notification::{Notification, Severity};
pub use notifier::{DEFAULT_LIFE, ErrorDetail, Notifier};
