use subtrack_notify::Notifier;

use crate::{
    PlanDraft, SubscriptionDraft, UserPlanDraft, ValidationError,
    rules::{check_plan, check_plan_update, check_subscription, check_user_plan},
};

/// Runs the checks and reports the first violation through the notifier.
#[derive(Debug, Clone)]
pub struct Validator {
    notifier: Notifier,
}

impl Validator {
    pub fn new(notifier: Notifier) -> Self {
        Self { notifier }
    }

    pub fn validate_plan(&self, plan: &PlanDraft) -> bool {
        self.accept(check_plan(plan))
    }

    pub fn validate_plan_update(&self, plan: &PlanDraft) -> bool {
        self.accept(check_plan_update(plan))
    }

    pub fn validate_user_plan(&self, user_plan: &UserPlanDraft) -> bool {
        self.accept(check_user_plan(user_plan))
    }

    pub fn validate_subscription(&self, subscription: &SubscriptionDraft) -> bool {
        self.accept(check_subscription(subscription))
    }

    /// Shows `err` as a validation message.
    pub fn report(&self, err: &ValidationError) {
        self.notifier.error(err.summary(), err.to_string());
    }

    fn accept(&self, outcome: Result<(), ValidationError>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }
}
