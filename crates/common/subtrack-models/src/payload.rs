//! Request bodies. Each one is built only after local validation succeeds.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CategoryId, Period, PlanId, SubscriptionId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubscription {
    pub name: String,
    pub category: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionCategoryPatch {
    pub category: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanPayload {
    pub name: String,
    pub cost: Decimal,
    pub period: Period,
    pub subscription: SubscriptionId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUserPlan {
    pub plan_id: PlanId,
    pub payment_date: NaiveDate,
    pub track_usage: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPlanPatch {
    pub payment_date: NaiveDate,
    pub track_usage: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackUsagePatch {
    pub track_usage: bool,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerifyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Tokens handed out by login, registration and refresh. Either may be
/// missing when the server delivers them as cookies instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn new_user_plan_sends_iso_date() {
        let body = serde_json::to_value(NewUserPlan {
            plan_id: 5,
            payment_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            track_usage: true,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"plan_id": 5, "payment_date": "2025-06-01", "track_usage": true})
        );
    }

    #[test]
    fn plan_payload_sends_lowercase_period() {
        let body = serde_json::to_value(PlanPayload {
            name: "Duo".to_string(),
            cost: dec!(14.99),
            period: Period::Month,
            subscription: 3,
        })
        .unwrap();

        assert_eq!(body["cost"], "14.99");
        assert_eq!(body["period"], "month");
        assert_eq!(body["subscription"], 3);
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "tony".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("tony"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn verify_request_omits_missing_token() {
        assert_eq!(
            serde_json::to_value(VerifyRequest::default()).unwrap(),
            json!({})
        );
    }
}
