use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CategoryId, PlanId, SubscriptionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    #[serde(rename = "category", alias = "category_id")]
    pub category_id: CategoryId,
    /// Plans nested by the list endpoint. Absent on some write responses.
    #[serde(default)]
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown billing period: {0:?}")]
pub struct PeriodParseError(pub String);

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so form input such as `"Month"` normalises to
/// [`Period::Month`].
impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    /// Sent by the API as a decimal string, accepted as a number too.
    pub cost: Decimal,
    pub period: Period,
    #[serde(rename = "subscription", alias = "subscription_id")]
    pub subscription_id: SubscriptionId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn period_parsing_ignores_case_and_whitespace() {
        assert_eq!("Month".parse::<Period>().unwrap(), Period::Month);
        assert_eq!(" YEAR ".parse::<Period>().unwrap(), Period::Year);
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert!("fortnight".parse::<Period>().is_err());
    }

    #[test]
    fn plan_accepts_decimal_string_cost() {
        let plan: Plan = serde_json::from_value(json!({
            "id": 3,
            "name": "Premium",
            "cost": "15.49",
            "period": "month",
            "subscription": 7
        }))
        .unwrap();

        assert_eq!(plan.cost, dec!(15.49));
        assert_eq!(plan.subscription_id, 7);
        assert_eq!(plan.period, Period::Month);
    }

    #[test]
    fn subscription_reads_nested_plans_and_category_key() {
        let subscription: Subscription = serde_json::from_value(json!({
            "id": 7,
            "name": "Netflix",
            "category": 2,
            "plans": [
                {"id": 3, "name": "Basic", "cost": 6.99, "period": "month", "subscription": 7}
            ]
        }))
        .unwrap();

        assert_eq!(subscription.category_id, 2);
        assert_eq!(subscription.plans.len(), 1);
        assert_eq!(subscription.plans[0].name, "Basic");
        assert_eq!(subscription.plans[0].cost, dec!(6.99));
    }

    #[test]
    fn subscription_without_plans_defaults_to_empty() {
        let subscription: Subscription =
            serde_json::from_value(json!({"id": 1, "name": "Spotify", "category": 4})).unwrap();
        assert!(subscription.plans.is_empty());
    }
}
