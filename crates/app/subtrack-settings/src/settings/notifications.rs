use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(with = "humantime_serde")]
    pub life: Duration,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            life: Duration::from_secs(3),
        }
    }
}
