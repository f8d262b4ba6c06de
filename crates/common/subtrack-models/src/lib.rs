//! Types exchanged between the Subtrack client and its REST API.
//!
//! Field names follow the server's JSON; where the server uses a bare foreign
//! key name (`category`, `subscription`, `plan`) the Rust field carries an
//! `_id` suffix and serde maps between the two.

mod catalog;
mod page;
mod payload;
mod profile;
mod user_plan;

pub use catalog::{Category, Period, PeriodParseError, Plan, Subscription};
pub use page::{ListResponse, Page};
pub use payload::{
    Credentials, NewSubscription, NewUserPlan, PlanPayload, RefreshRequest,
    SubscriptionCategoryPatch, TokenPair, TrackUsagePatch, UserPlanPatch, VerifyRequest,
};
pub use profile::{GUEST_AVATAR_URL, UserProfile};
pub use user_plan::{BudgetRequest, BudgetSplit, UserPlan, UserPlanFilter};

pub type CategoryId = i64;
pub type SubscriptionId = i64;
pub type PlanId = i64;
pub type UserPlanId = i64;
pub type UserId = i64;
