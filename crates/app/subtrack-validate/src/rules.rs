use rust_decimal::Decimal;
use subtrack_format::parse_calendar_date;
use subtrack_models::{CategoryId, Period, SubscriptionId};

use crate::{PlanDraft, SubscriptionDraft, UserPlanDraft, ValidationError};

pub const MAX_NAME_LEN: usize = 50;

pub fn check_plan(plan: &PlanDraft) -> Result<(), ValidationError> {
    if plan.name.trim().is_empty() || plan.period.trim().is_empty() || plan.subscription.is_none()
    {
        return Err(ValidationError::PlanFieldsMissing);
    }
    if plan.name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::PlanNameTooLong);
    }
    if plan.cost.is_some_and(|cost| cost < Decimal::ZERO) {
        return Err(ValidationError::NegativeCost);
    }
    plan.period
        .parse::<Period>()
        .map_err(|_| ValidationError::UnknownPeriod(plan.period.trim().to_string()))?;
    Ok(())
}

/// Updating needs everything creating does, plus the plan id and a cost.
pub fn check_plan_update(plan: &PlanDraft) -> Result<(), ValidationError> {
    check_plan(plan)?;
    if plan.id.is_none() {
        return Err(ValidationError::PlanIdMissing);
    }
    if plan.cost.is_none() {
        return Err(ValidationError::PlanCostMissing);
    }
    Ok(())
}

pub fn check_user_plan(user_plan: &UserPlanDraft) -> Result<(), ValidationError> {
    let payment_date = match user_plan.payment_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => date,
        _ => return Err(ValidationError::PaymentDateMissing),
    };
    if parse_calendar_date(payment_date).is_none() {
        return Err(ValidationError::PaymentDateInvalid);
    }
    Ok(())
}

pub fn check_subscription(subscription: &SubscriptionDraft) -> Result<(), ValidationError> {
    if subscription.name.trim().is_empty() {
        return Err(ValidationError::SubscriptionFieldsMissing);
    }
    if subscription.category.is_none() {
        return Err(ValidationError::SubscriptionCategoryMissing);
    }
    Ok(())
}

pub fn check_category_change(
    subscription: Option<SubscriptionId>,
    category: Option<CategoryId>,
) -> Result<(SubscriptionId, CategoryId), ValidationError> {
    match (subscription, category) {
        (Some(subscription), Some(category)) => Ok((subscription, category)),
        _ => Err(ValidationError::CategoryChangeMissing),
    }
}

pub fn check_budget(budget: Option<Decimal>) -> Result<Decimal, ValidationError> {
    match budget {
        None => Err(ValidationError::BudgetMissing),
        Some(budget) if budget < Decimal::ZERO => Err(ValidationError::NegativeBudget),
        Some(budget) => Ok(budget),
    }
}
