use subtrack_auth::PushRegistrar;
use subtrack_models::UserId;
use tracing::info;

/// Stands in for a push service by recording registrations in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPushRegistrar;

impl PushRegistrar for LogPushRegistrar {
    fn register(&self, user_id: UserId) {
        info!("Push notifications registered for user {}", user_id);
    }

    fn unregister(&self) {
        info!("Push notifications unregistered");
    }
}
