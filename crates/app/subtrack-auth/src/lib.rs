mod claims;
mod client;
mod error;
mod gate;
mod interceptor;
mod manager;
mod push;
mod routes;
mod session;
mod token_storage;

pub use claims::{Claims, decode_claims, is_expired};
pub use client::AuthClient;
pub use error::{AuthError, Result};
pub use gate::{AuthGate, Navigation};
pub use interceptor::AuthInterceptor;
pub use manager::AuthManager;
pub use push::{NoopPushRegistrar, PushRegistrar};
pub use routes::{LANDING_PATH, LOGIN_PATH, REGISTER_PATH, Route, RouteTable};
pub use session::{SessionState, SessionStore};
pub use token_storage::{MemoryTokenStorage, TokenStorage};
