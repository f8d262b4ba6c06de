use serde::{Deserialize, Serialize};

mod error;
mod json;
mod persistence;
mod settings;

pub use error::{Error, Result};
pub use persistence::{SETTINGS_FILE, default_path};
pub use settings::{ApiSettings, NotificationSettings, PushSettings};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub api: ApiSettings,
    pub notifications: NotificationSettings,
    pub push: PushSettings,
}
