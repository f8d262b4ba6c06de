use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use subtrack_endpoint::{ApiRequest, Result, Transport};
use subtrack_models::{Category, CategoryId, ListResponse, Subscription, UserPlan, UserPlanFilter};
use subtrack_notify::Notifier;
use subtrack_validate::Validator;
use tracing::debug;

use crate::{Collection, LoadingState, loading::LoadingFlags};

pub(crate) const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Default)]
struct Caches {
    subscriptions: RwLock<Vec<Subscription>>,
    categories: RwLock<Vec<Category>>,
    user_plans: RwLock<Vec<UserPlan>>,
    user_plan_filter: RwLock<UserPlanFilter>,
}

/// Owns the cached collections and every operation that reads or writes
/// them.
///
/// No operation returns an error. Failures are logged, shown through the
/// [`Notifier`], and the operation resolves to `None` or `false`. Clones
/// share caches and loading flags.
#[derive(Clone)]
pub struct SubscriptionManager {
    transport: Arc<dyn Transport>,
    notifier: Notifier,
    pub(crate) validator: Validator,
    caches: Arc<Caches>,
    loading: Arc<LoadingFlags>,
}

impl SubscriptionManager {
    pub fn new(transport: Arc<dyn Transport>, notifier: Notifier) -> Self {
        Self {
            transport,
            validator: Validator::new(notifier.clone()),
            notifier,
            caches: Arc::default(),
            loading: Arc::default(),
        }
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.caches.subscriptions.read().clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.caches.categories.read().clone()
    }

    pub fn user_plans(&self) -> Vec<UserPlan> {
        self.caches.user_plans.read().clone()
    }

    /// The filter the user-plan cache was last fetched with.
    pub fn user_plan_filter(&self) -> UserPlanFilter {
        self.caches.user_plan_filter.read().clone()
    }

    pub fn loading(&self) -> LoadingState {
        self.loading.snapshot()
    }

    pub fn category_name(&self, category_id: CategoryId) -> String {
        self.caches
            .categories
            .read()
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.name.clone())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
    }

    pub async fn fetch_subscriptions(&self) -> Option<Vec<Subscription>> {
        let _loading = self.loading.begin(Collection::Subscriptions);
        match self.get_list(ApiRequest::get("/subscriptions/")).await {
            Ok(subscriptions) => {
                debug!("Replacing subscriptions cache ({} items)", subscriptions.len());
                *self.caches.subscriptions.write() = subscriptions.clone();
                Some(subscriptions)
            }
            Err(err) => {
                self.notifier
                    .handle_error("Error fetching subscriptions", &err);
                None
            }
        }
    }

    pub async fn fetch_categories(&self) -> Option<Vec<Category>> {
        let _loading = self.loading.begin(Collection::Categories);
        match self.get_list(ApiRequest::get("/categories/")).await {
            Ok(categories) => {
                debug!("Replacing categories cache ({} items)", categories.len());
                *self.caches.categories.write() = categories.clone();
                Some(categories)
            }
            Err(err) => {
                self.notifier.handle_error("Error fetching categories", &err);
                None
            }
        }
    }

    /// Fetches the caller's user-plans. `None` reuses the filter of the last
    /// successful fetch, which is also what refetches after a write do.
    pub async fn fetch_user_plans(&self, filter: Option<UserPlanFilter>) -> Option<Vec<UserPlan>> {
        let (filter, replaces_filter) = match filter {
            Some(filter) => (filter, true),
            None => (self.user_plan_filter(), false),
        };

        let _loading = self.loading.begin(Collection::UserPlans);
        let request = ApiRequest::get("/user-plans/").with_query(filter.to_query());
        match self.get_list(request).await {
            Ok(user_plans) => {
                debug!("Replacing user-plans cache ({} items)", user_plans.len());
                *self.caches.user_plans.write() = user_plans.clone();
                if replaces_filter {
                    *self.caches.user_plan_filter.write() = filter;
                }
                Some(user_plans)
            }
            Err(err) => {
                self.notifier.handle_error("Error fetching user plans", &err);
                None
            }
        }
    }

    /// Loads all three collections concurrently and returns once each
    /// fetch has settled.
    pub async fn init_data(&self) {
        tokio::join!(
            self.fetch_categories(),
            self.fetch_subscriptions(),
            self.fetch_user_plans(None),
        );
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.transport.execute(request).await?.json()
    }

    async fn get_list<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Vec<T>> {
        let list: ListResponse<T> = self.get(request).await?;
        Ok(list.into_items())
    }

    /// Sends a write, refetches `owner` once the server accepted it, then
    /// decodes the reply.
    pub(crate) async fn mutate<T: DeserializeOwned>(
        &self,
        request: Result<ApiRequest>,
        owner: Collection,
    ) -> Result<T> {
        let response = self.transport.execute(request?).await?;
        self.refetch(owner).await;
        response.json()
    }

    async fn refetch(&self, owner: Collection) {
        match owner {
            Collection::Subscriptions => {
                self.fetch_subscriptions().await;
            }
            Collection::Categories => {
                self.fetch_categories().await;
            }
            Collection::UserPlans => {
                self.fetch_user_plans(None).await;
            }
        }
    }

    /// Turns a write outcome into its sentinel, notifying either way.
    pub(crate) fn settle<T>(
        &self,
        outcome: Result<T>,
        success: Option<(&str, &str)>,
        failure: &str,
    ) -> Option<T> {
        match outcome {
            Ok(value) => {
                if let Some((summary, detail)) = success {
                    self.notifier.success(summary, detail);
                }
                Some(value)
            }
            Err(err) => {
                self.notifier.handle_error(failure, &err);
                None
            }
        }
    }
}
