use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PushSettings {
    /// Register with the push service after sign-in.
    pub enabled: bool,
}
