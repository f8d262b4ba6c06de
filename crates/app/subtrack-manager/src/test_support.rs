use std::sync::Arc;

use serde_json::{Value, json};
use subtrack_endpoint::mock::MockTransport;
use subtrack_notify::{Notification, Notifier};
use tokio::sync::broadcast;

use crate::SubscriptionManager;

pub(crate) struct Harness {
    pub mock: Arc<MockTransport>,
    pub manager: SubscriptionManager,
    pub notifications: broadcast::Receiver<Notification>,
}

impl Harness {
    pub fn new() -> Self {
        let mock = Arc::new(MockTransport::new());
        let notifier = Notifier::new();
        let notifications = notifier.subscribe();
        let manager = SubscriptionManager::new(mock.clone(), notifier);
        Self {
            mock,
            manager,
            notifications,
        }
    }

    pub fn next_notification(&mut self) -> Notification {
        self.notifications
            .try_recv()
            .expect("expected a notification")
    }
}

pub(crate) fn category_json(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name})
}

pub(crate) fn subscription_json(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name, "category": 1, "plans": []})
}

pub(crate) fn plan_json(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name, "cost": "9.99", "period": "month", "subscription": 3})
}

pub(crate) fn user_plan_json(id: i64, plan: i64) -> Value {
    json!({
        "id": id,
        "plan": plan,
        "user": "tony",
        "payment_date": "2025-06-01",
        "track_usage": false,
        "total_spent": "19.98",
        "usage_score": 0,
        "average_usage": 0,
        "last_updated": null,
        "plan_name": "Premium",
        "cost": "9.99",
        "period": "month",
        "subscription_name": "Netflix",
        "category_id": 1,
        "icon_url": null
    })
}
