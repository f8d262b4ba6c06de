//! Validation of form input before anything is sent to the API.
//!
//! Every rule lives in a pure `check_*` function that stops at the first
//! violation. [`Validator`] wraps those checks and turns a violation into a
//! single error notification.

mod draft;
mod error;
mod rules;
mod validator;

pub use draft::{PlanDraft, SubscriptionDraft, UserPlanDraft};
pub use error::ValidationError;
pub use rules::{
    MAX_NAME_LEN, check_budget, check_category_change, check_plan, check_plan_update,
    check_subscription, check_user_plan,
};
pub use validator::Validator;
