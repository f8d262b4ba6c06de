//! Client-side state for subscriptions, plans and the user's own plans.
//!
//! [`SubscriptionManager`] keeps one cache per collection and mediates every
//! read and write against the API. Writes never touch a cache directly: a
//! successful write refetches the collection that owns the record.

mod catalog;
mod loading;
mod manager;
mod user_plans;

#[cfg(test)]
mod test_support;

pub use loading::{Collection, LoadingState};
pub use manager::SubscriptionManager;
