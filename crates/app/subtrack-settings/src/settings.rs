mod api;
mod notifications;
mod push;

pub use api::ApiSettings;
pub use notifications::NotificationSettings;
pub use push::PushSettings;
