use std::sync::atomic::{AtomicUsize, Ordering};

/// The three cached collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Subscriptions,
    Categories,
    UserPlans,
}

/// Snapshot of the in-flight fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub subscriptions: bool,
    pub categories: bool,
    pub user_plans: bool,
}

/// In-flight fetch counts. A collection is loading while its count is
/// non-zero, so overlapping fetches keep the flag up until the last one
/// settles.
#[derive(Debug, Default)]
pub(crate) struct LoadingFlags {
    subscriptions: AtomicUsize,
    categories: AtomicUsize,
    user_plans: AtomicUsize,
}

impl LoadingFlags {
    /// Counts a fetch of `collection` as in flight until the guard is
    /// dropped.
    pub(crate) fn begin(&self, collection: Collection) -> LoadingGuard<'_> {
        let in_flight = self.counter(collection);
        in_flight.fetch_add(1, Ordering::AcqRel);
        LoadingGuard { in_flight }
    }

    pub(crate) fn snapshot(&self) -> LoadingState {
        LoadingState {
            subscriptions: self.subscriptions.load(Ordering::Acquire) > 0,
            categories: self.categories.load(Ordering::Acquire) > 0,
            user_plans: self.user_plans.load(Ordering::Acquire) > 0,
        }
    }

    fn counter(&self, collection: Collection) -> &AtomicUsize {
        match collection {
            Collection::Subscriptions => &self.subscriptions,
            Collection::Categories => &self.categories,
            Collection::UserPlans => &self.user_plans,
        }
    }
}

pub(crate) struct LoadingGuard<'a> {
    in_flight: &'a AtomicUsize,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
