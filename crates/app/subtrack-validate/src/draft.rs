use rust_decimal::Decimal;
use subtrack_models::{CategoryId, PlanId, SubscriptionId};

/// Plan form input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanDraft {
    /// Set when editing an existing plan.
    pub id: Option<PlanId>,
    pub name: String,
    pub cost: Option<Decimal>,
    pub period: String,
    pub subscription: Option<SubscriptionId>,
}

/// User-plan form input. `track_usage` is a `bool` by construction, so the
/// only runtime rule left for it is presence where an operation needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPlanDraft {
    pub payment_date: Option<String>,
    pub track_usage: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionDraft {
    pub name: String,
    pub category: Option<CategoryId>,
}
