use serde::{Deserialize, Serialize};

use crate::UserId;

pub const GUEST_AVATAR_URL: &str = "https://avatar.iran.liara.run/public";

/// Identity shown by the UI. Before a real profile is loaded every field
/// holds the guest value, so views never see an empty profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: UserId,
    pub avatar_url: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserProfile {
    pub fn guest() -> Self {
        Self {
            id: 0,
            avatar_url: GUEST_AVATAR_URL.to_string(),
            email: "guest@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.id == 0
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::guest()
    }
}
