use chrono::NaiveDate;
use serde::de::IgnoredAny;
use subtrack_endpoint::ApiRequest;
use subtrack_format::{format_currency, parse_calendar_date};
use subtrack_models::{
    BudgetRequest, BudgetSplit, CategoryId, NewUserPlan, PlanId, TrackUsagePatch, UserPlan, UserPlanId,
    UserPlanPatch,
};
use subtrack_validate::{UserPlanDraft, check_budget};

use crate::{Collection, SubscriptionManager, manager::UNKNOWN_CATEGORY};

impl SubscriptionManager {
    pub async fn fetch_user_plan(&self, user_plan_id: UserPlanId) -> Option<UserPlan> {
        let outcome = self
            .get(ApiRequest::get(format!("/user-plans/{user_plan_id}/")))
            .await;
        self.settle(outcome, None, "Error fetching user plan")
    }

    pub async fn add_to_user_plans(
        &self,
        plan_id: PlanId,
        payment_date: &str,
        track_usage: bool,
    ) -> bool {
        let Some(payment_date) = self.checked_payment_date(payment_date, track_usage) else {
            return false;
        };

        let payload = NewUserPlan {
            plan_id,
            payment_date,
            track_usage,
        };
        let outcome = self
            .mutate::<IgnoredAny>(
                ApiRequest::post("/user-plans/").with_json(&payload),
                Collection::UserPlans,
            )
            .await;
        self.settle(
            outcome,
            Some(("Plan added", "Successfully added to your list")),
            "Couldn't add to list",
        )
        .is_some()
    }

    pub async fn update_user_plan(
        &self,
        user_plan_id: UserPlanId,
        payment_date: &str,
        track_usage: bool,
    ) -> Option<UserPlan> {
        let payment_date = self.checked_payment_date(payment_date, track_usage)?;

        let payload = UserPlanPatch {
            payment_date,
            track_usage,
        };
        let outcome = self
            .mutate(
                ApiRequest::patch(format!("/user-plans/{user_plan_id}/")).with_json(&payload),
                Collection::UserPlans,
            )
            .await;
        self.settle(
            outcome,
            Some(("Plan updated", "Successfully updated user plan")),
            "Error updating user plan",
        )
    }

    pub async fn delete_user_plan(&self, user_plan_id: UserPlanId) -> bool {
        let outcome = self
            .mutate::<IgnoredAny>(
                Ok(ApiRequest::delete(format!("/user-plans/{user_plan_id}/"))),
                Collection::UserPlans,
            )
            .await;
        self.settle(
            outcome,
            Some((
                "Plan removed",
                "The plan was successfully removed from your list",
            )),
            "Error deleting user plan",
        )
        .is_some()
    }

    /// Flips usage tracking: the server is sent the negation of
    /// `current_track_usage`.
    pub async fn toggle_usage(&self, user_plan_id: UserPlanId, current_track_usage: bool) -> bool {
        let patch = TrackUsagePatch {
            track_usage: !current_track_usage,
        };
        let outcome = self
            .mutate::<IgnoredAny>(
                ApiRequest::patch(format!("/user-plans/{user_plan_id}/toggle-usage/"))
                    .with_json(&patch),
                Collection::UserPlans,
            )
            .await;
        self.settle(outcome, None, "Error toggling usage tracking")
            .is_some()
    }

    /// Asks the server which of the user's plans fit in `request.budget`.
    /// Nothing is cached.
    pub async fn set_budget(&self, request: &BudgetRequest) -> Option<BudgetSplit> {
        let budget = match check_budget(request.budget) {
            Ok(budget) => budget,
            Err(err) => {
                self.validator.report(&err);
                return None;
            }
        };

        let outcome = self
            .get::<BudgetSplit>(
                ApiRequest::get("/analytics/set-budget/").with_query(request.to_query()),
            )
            .await;
        let detail = match request.category_id {
            Some(category_id) => format!(
                "Budget of {} has been set for {}",
                format_currency(budget),
                self.category_label(category_id)
            ),
            None => format!("Budget of {} has been set", format_currency(budget)),
        };
        self.settle(
            outcome,
            Some(("Budget Applied", detail.as_str())),
            "Error setting budget",
        )
    }

    fn category_label(&self, category_id: CategoryId) -> String {
        let name = self.category_name(category_id);
        if name == UNKNOWN_CATEGORY {
            "selected category".to_string()
        } else {
            name
        }
    }

    fn checked_payment_date(&self, payment_date: &str, track_usage: bool) -> Option<NaiveDate> {
        let draft = UserPlanDraft {
            payment_date: Some(payment_date.to_string()),
            track_usage: Some(track_usage),
        };
        if !self.validator.validate_user_plan(&draft) {
            return None;
        }
        parse_calendar_date(payment_date.trim())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;
    use subtrack_endpoint::Method;
    use subtrack_models::{BudgetRequest, Period};
    use subtrack_notify::Severity;

    use crate::test_support::{Harness, category_json, user_plan_json};

    #[tokio::test]
    async fn add_to_user_plans_posts_refetches_then_announces() {
        let mut h = Harness::new();
        h.mock
            .respond(Method::POST, "/user-plans/", 201, user_plan_json(10, 5))
            .respond(
                Method::GET,
                "/user-plans/",
                200,
                json!([user_plan_json(10, 5)]),
            );
        let refetch = h.mock.hold(Method::GET, "/user-plans/");

        let manager = &h.manager;
        let notifications = &mut h.notifications;
        let observe = async {
            tokio::task::yield_now().await;
            let silent = notifications.try_recv().is_err();
            refetch.notify_one();
            silent
        };
        let (added, silent_during_refetch) =
            tokio::join!(manager.add_to_user_plans(5, "2025-06-01", true), observe);

        assert!(added);
        assert!(silent_during_refetch);

        let requests = h.mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/user-plans/");
        assert_eq!(
            requests[0].body,
            Some(json!({
                "plan_id": 5,
                "payment_date": "2025-06-01",
                "track_usage": true
            }))
        );
        assert_eq!(requests[1].method, Method::GET);
        assert_eq!(requests[1].path, "/user-plans/");

        let note = h.next_notification();
        assert_eq!(note.severity, Severity::Success);
        assert_eq!(note.summary, "Plan added");
        assert!(h.notifications.try_recv().is_err());
        assert_eq!(h.manager.user_plans().len(), 1);
    }

    #[tokio::test]
    async fn timestamps_are_sent_as_calendar_dates() {
        let h = Harness::new();
        h.mock
            .respond(Method::POST, "/user-plans/", 201, json!({}))
            .respond(Method::GET, "/user-plans/", 200, json!([]));

        assert!(
            h.manager
                .add_to_user_plans(5, "2025-06-01T00:00:00Z", false)
                .await
        );
        let sent = h.mock.last(&Method::POST, "/user-plans/").unwrap();
        assert_eq!(sent.body.unwrap()["payment_date"], json!("2025-06-01"));
    }

    #[tokio::test]
    async fn missing_payment_date_is_rejected_locally() {
        let mut h = Harness::new();

        assert!(!h.manager.add_to_user_plans(5, "", false).await);
        assert!(h.manager.update_user_plan(10, "not a date", true).await.is_none());

        assert!(h.mock.requests().is_empty());
        assert_eq!(h.next_notification().detail, "Payment date is required");
        assert_eq!(h.next_notification().detail, "Payment date is invalid");
    }

    #[tokio::test]
    async fn update_user_plan_allows_disabling_tracking() {
        let mut h = Harness::new();
        h.mock
            .respond(Method::PATCH, "/user-plans/10/", 200, user_plan_json(10, 5))
            .respond(Method::GET, "/user-plans/", 200, json!([]));

        let updated = h.manager.update_user_plan(10, "2025-07-15", false).await;

        assert_eq!(updated.unwrap().id, 10);
        let sent = h.mock.last(&Method::PATCH, "/user-plans/10/").unwrap();
        assert_eq!(
            sent.body,
            Some(json!({"payment_date": "2025-07-15", "track_usage": false}))
        );
        assert_eq!(h.mock.count(&Method::GET, "/user-plans/"), 1);
        assert_eq!(h.next_notification().summary, "Plan updated");
    }

    #[tokio::test]
    async fn toggle_usage_sends_the_negation() {
        let mut h = Harness::new();
        h.mock
            .respond(
                Method::PATCH,
                "/user-plans/10/toggle-usage/",
                200,
                json!({"track_usage": false}),
            )
            .respond(Method::GET, "/user-plans/", 200, json!([]));

        assert!(h.manager.toggle_usage(10, true).await);
        let sent = h
            .mock
            .last(&Method::PATCH, "/user-plans/10/toggle-usage/")
            .unwrap();
        assert_eq!(sent.body, Some(json!({"track_usage": false})));

        assert!(h.manager.toggle_usage(10, false).await);
        let sent = h
            .mock
            .last(&Method::PATCH, "/user-plans/10/toggle-usage/")
            .unwrap();
        assert_eq!(sent.body, Some(json!({"track_usage": true})));

        assert_eq!(h.mock.count(&Method::GET, "/user-plans/"), 2);
        assert!(h.notifications.try_recv().is_err());
    }

    #[tokio::test]
    async fn refetch_after_write_reuses_the_filter() {
        let h = Harness::new();
        h.mock
            .respond(Method::GET, "/user-plans/", 200, json!([]))
            .respond(Method::DELETE, "/user-plans/10/", 204, serde_json::Value::Null);
        let filter = subtrack_models::UserPlanFilter {
            track_usage: Some(true),
            ..Default::default()
        };
        h.manager.fetch_user_plans(Some(filter.clone())).await;

        assert!(h.manager.delete_user_plan(10).await);

        let refetch = h.mock.last(&Method::GET, "/user-plans/").unwrap();
        assert_eq!(refetch.query, filter.to_query());
        assert_eq!(h.mock.count(&Method::GET, "/user-plans/"), 2);
    }

    #[tokio::test]
    async fn failed_delete_reports_and_skips_refetch() {
        let mut h = Harness::new();
        h.mock.respond(
            Method::DELETE,
            "/user-plans/10/",
            403,
            json!({"error": "Not your plan"}),
        );

        assert!(!h.manager.delete_user_plan(10).await);
        assert_eq!(h.mock.count(&Method::GET, "/user-plans/"), 0);
        assert_eq!(h.next_notification().detail, "Not your plan");
    }

    #[tokio::test]
    async fn fetch_user_plan_failure_is_none() {
        let mut h = Harness::new();

        assert!(h.manager.fetch_user_plan(77).await.is_none());
        assert_eq!(h.next_notification().detail, "Error fetching user plan");
    }

    #[tokio::test]
    async fn budget_requires_a_value() {
        let mut h = Harness::new();

        assert!(
            h.manager
                .set_budget(&BudgetRequest::default())
                .await
                .is_none()
        );
        assert!(h.mock.requests().is_empty());
        let note = h.next_notification();
        assert_eq!(note.summary, "Error");
        assert_eq!(note.detail, "Please enter a budget.");
    }

    #[tokio::test]
    async fn budget_is_passed_through() {
        let mut h = Harness::new();
        h.mock
            .respond(
                Method::GET,
                "/categories/",
                200,
                json!([category_json(2, "Music")]),
            )
            .respond(
                Method::GET,
                "/analytics/set-budget/",
                200,
                json!({
                    "included_plans": [user_plan_json(10, 5)],
                    "excluded_plans": [user_plan_json(11, 6)]
                }),
            );
        h.manager.fetch_categories().await;

        let request = BudgetRequest {
            budget: Some(dec!(50)),
            category_id: Some(2),
            period: Some(Period::Month),
        };
        let split = h.manager.set_budget(&request).await.unwrap();

        assert_eq!(split.included_plans.len(), 1);
        assert_eq!(split.excluded_plans[0].id, 11);
        let sent = h.mock.last(&Method::GET, "/analytics/set-budget/").unwrap();
        assert_eq!(sent.query, request.to_query());
        assert!(h.manager.user_plans().is_empty());

        let note = h.next_notification();
        assert_eq!(note.summary, "Budget Applied");
        assert_eq!(note.detail, "Budget of $50.00 has been set for Music");
    }
}
