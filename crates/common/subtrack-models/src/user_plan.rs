use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CategoryId, Period, PlanId, UserPlanId};

/// One user's enrollment in one plan.
///
/// The server flattens a few plan and subscription columns into the record
/// for display; those are optional here because write endpoints do not
/// always include them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPlan {
    pub id: UserPlanId,
    #[serde(rename = "plan", alias = "plan_id")]
    pub plan_id: PlanId,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub track_usage: bool,
    #[serde(default)]
    pub total_spent: Option<Decimal>,
    #[serde(default)]
    pub usage_score: i32,
    #[serde(default)]
    pub average_usage: i32,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,

    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub period: Option<Period>,
    #[serde(default)]
    pub subscription_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// Query filters understood by `GET /user-plans/`. Unset fields are omitted
/// from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPlanFilter {
    pub category_id: Option<CategoryId>,
    pub track_usage: Option<bool>,
    pub period: Option<Period>,
    pub cost_min: Option<Decimal>,
    pub cost_max: Option<Decimal>,
    pub days_until_payment: Option<u32>,
    pub recently_paid: Option<u32>,
    /// `payment_date`, `plan__name`, `track_usage` or `cost`, optionally
    /// prefixed with `-` for descending order.
    pub ordering: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl UserPlanFilter {
    pub fn is_empty(&self) -> bool {
        *self == UserPlanFilter::default()
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key.to_string(), value));
            }
        };

        push("category_id", self.category_id.map(|v| v.to_string()));
        push("track_usage", self.track_usage.map(|v| v.to_string()));
        push("period", self.period.map(|v| v.to_string()));
        push("cost_min", self.cost_min.map(|v| v.to_string()));
        push("cost_max", self.cost_max.map(|v| v.to_string()));
        push(
            "days_until_payment",
            self.days_until_payment.map(|v| v.to_string()),
        );
        push("recently_paid", self.recently_paid.map(|v| v.to_string()));
        push("ordering", self.ordering.clone());
        push("page", self.page.map(|v| v.to_string()));
        push("page_size", self.page_size.map(|v| v.to_string()));

        query
    }
}

/// Parameters forwarded verbatim to the budget endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetRequest {
    pub budget: Option<Decimal>,
    pub category_id: Option<CategoryId>,
    pub period: Option<Period>,
}

impl BudgetRequest {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(budget) = self.budget {
            query.push(("budget".to_string(), budget.to_string()));
        }
        if let Some(category_id) = self.category_id {
            query.push(("category_id".to_string(), category_id.to_string()));
        }
        if let Some(period) = self.period {
            query.push(("period".to_string(), period.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetSplit {
    #[serde(default)]
    pub included_plans: Vec<UserPlan>,
    #[serde(default)]
    pub excluded_plans: Vec<UserPlan>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn user_plan_reads_flattened_server_record() {
        let user_plan: UserPlan = serde_json::from_value(json!({
            "id": 11,
            "plan": 5,
            "user": "tony",
            "payment_date": "2025-06-01",
            "last_updated": null,
            "total_spent": "120.00",
            "track_usage": true,
            "usage_score": 7,
            "average_usage": 3,
            "plan_name": "Family",
            "cost": "19.99",
            "period": "month",
            "subscription_name": "Spotify",
            "category_id": 2,
            "icon_url": null
        }))
        .unwrap();

        assert_eq!(user_plan.plan_id, 5);
        assert_eq!(
            user_plan.payment_date,
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(user_plan.total_spent, Some(dec!(120.00)));
        assert_eq!(user_plan.cost, Some(dec!(19.99)));
        assert_eq!(user_plan.period, Some(Period::Month));
        assert!(user_plan.icon_url.is_none());
    }

    #[test]
    fn minimal_user_plan_uses_defaults() {
        let user_plan: UserPlan =
            serde_json::from_value(json!({"id": 1, "plan_id": 9})).unwrap();
        assert_eq!(user_plan.plan_id, 9);
        assert!(!user_plan.track_usage);
        assert!(user_plan.payment_date.is_none());
        assert!(user_plan.total_spent.is_none());
    }

    #[test]
    fn empty_filter_produces_no_query() {
        let filter = UserPlanFilter::default();
        assert!(filter.is_empty());
        assert!(filter.to_query().is_empty());
    }

    #[test]
    fn filter_serialises_only_set_fields() {
        let filter = UserPlanFilter {
            track_usage: Some(true),
            period: Some(Period::Year),
            ordering: Some("-payment_date".to_string()),
            ..Default::default()
        };

        assert_eq!(
            filter.to_query(),
            vec![
                ("track_usage".to_string(), "true".to_string()),
                ("period".to_string(), "year".to_string()),
                ("ordering".to_string(), "-payment_date".to_string()),
            ]
        );
    }
}
