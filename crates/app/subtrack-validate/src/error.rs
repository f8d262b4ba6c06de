use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields. Fill out name, period, or subscription.")]
    PlanFieldsMissing,

    #[error("Plan cost is required.")]
    PlanCostMissing,

    #[error("Plan must be saved before it can be updated.")]
    PlanIdMissing,

    #[error("Plan name is too long")]
    PlanNameTooLong,

    #[error("Plan cost cannot be negative")]
    NegativeCost,

    #[error("Unknown billing period: {0}")]
    UnknownPeriod(String),

    #[error("Payment date is required")]
    PaymentDateMissing,

    #[error("Payment date is invalid")]
    PaymentDateInvalid,

    #[error("Missing required fields. Fill out subscription name or category.")]
    SubscriptionFieldsMissing,

    #[error("Subscription category is required")]
    SubscriptionCategoryMissing,

    #[error("Subscription ID and new category are required.")]
    CategoryChangeMissing,

    #[error("Please enter a budget.")]
    BudgetMissing,

    #[error("Budget must be a positive number")]
    NegativeBudget,
}

impl ValidationError {
    pub fn summary(&self) -> &'static str {
        match self {
            ValidationError::BudgetMissing | ValidationError::NegativeBudget => "Error",
            _ => "Validation Error",
        }
    }
}
