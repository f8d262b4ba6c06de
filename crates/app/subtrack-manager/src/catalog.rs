use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use subtrack_endpoint::ApiRequest;
use subtrack_models::{
    CategoryId, NewSubscription, Period, Plan, PlanId, PlanPayload, Subscription,
    SubscriptionCategoryPatch, SubscriptionId,
};
use subtrack_validate::{PlanDraft, SubscriptionDraft, check_category_change};

use crate::{Collection, SubscriptionManager};

impl SubscriptionManager {
    pub async fn fetch_plan(&self, plan_id: PlanId) -> Option<Plan> {
        let outcome = self
            .get(ApiRequest::get(format!("/plans/{plan_id}/")))
            .await;
        self.settle(outcome, None, "Error fetching plan")
    }

    pub async fn create_subscription(
        &self,
        name: &str,
        category_id: Option<CategoryId>,
    ) -> Option<Subscription> {
        let draft = SubscriptionDraft {
            name: name.trim().to_string(),
            category: category_id,
        };
        if !self.validator.validate_subscription(&draft) {
            return None;
        }
        let category = draft.category?;

        let payload = NewSubscription {
            name: draft.name,
            category,
        };
        let outcome = self
            .mutate(
                ApiRequest::post("/subscriptions/").with_json(&payload),
                Collection::Subscriptions,
            )
            .await;
        self.settle(
            outcome,
            Some(("Success", "Subscription added.")),
            "Error adding subscription",
        )
    }

    pub async fn update_subscription_category(
        &self,
        subscription_id: Option<SubscriptionId>,
        new_category_id: Option<CategoryId>,
    ) -> Option<Subscription> {
        let (subscription_id, category) =
            match check_category_change(subscription_id, new_category_id) {
                Ok(ids) => ids,
                Err(err) => {
                    self.validator.report(&err);
                    return None;
                }
            };

        let outcome = self
            .mutate(
                ApiRequest::patch(format!("/subscriptions/{subscription_id}/"))
                    .with_json(&SubscriptionCategoryPatch { category }),
                Collection::Subscriptions,
            )
            .await;
        self.settle(
            outcome,
            Some(("Success", "Subscription category updated.")),
            "Error updating subscription category",
        )
    }

    pub async fn delete_subscription(&self, subscription_id: SubscriptionId) -> bool {
        let outcome = self
            .mutate::<IgnoredAny>(
                Ok(ApiRequest::delete(format!(
                    "/subscriptions/{subscription_id}/"
                ))),
                Collection::Subscriptions,
            )
            .await;
        self.settle(
            outcome,
            Some(("Subscription removed", "The subscription was successfully deleted")),
            "Error deleting subscription",
        )
        .is_some()
    }

    /// Creates a plan. A missing cost is sent as zero and the period is
    /// normalised to lower case.
    pub async fn create_plan(&self, draft: &PlanDraft) -> Option<Plan> {
        if !self.validator.validate_plan(draft) {
            return None;
        }
        let payload = plan_payload(draft)?;

        let outcome = self
            .mutate(
                ApiRequest::post("/plans/").with_json(&payload),
                Collection::Subscriptions,
            )
            .await;
        self.settle(
            outcome,
            Some(("Success", "Plan created successfully.")),
            "Error creating plan",
        )
    }

    pub async fn update_plan(&self, draft: &PlanDraft) -> Option<Plan> {
        if !self.validator.validate_plan_update(draft) {
            return None;
        }
        let plan_id = draft.id?;
        let payload = plan_payload(draft)?;

        let outcome = self
            .mutate(
                ApiRequest::put(format!("/plans/{plan_id}/")).with_json(&payload),
                Collection::Subscriptions,
            )
            .await;
        self.settle(
            outcome,
            Some(("Success", "Plan updated.")),
            "Error updating plan",
        )
    }

    pub async fn delete_plan(&self, plan_id: PlanId) -> bool {
        let outcome = self
            .mutate::<IgnoredAny>(
                Ok(ApiRequest::delete(format!("/plans/{plan_id}/"))),
                Collection::Subscriptions,
            )
            .await;
        self.settle(
            outcome,
            Some(("Plan removed", "The plan was successfully deleted")),
            "Error deleting plan",
        )
        .is_some()
    }
}

/// Only called on a draft that already passed validation.
fn plan_payload(draft: &PlanDraft) -> Option<PlanPayload> {
    Some(PlanPayload {
        name: draft.name.trim().to_string(),
        cost: draft.cost.unwrap_or(Decimal::ZERO),
        period: draft.period.parse::<Period>().ok()?,
        subscription: draft.subscription?,
    })
}
