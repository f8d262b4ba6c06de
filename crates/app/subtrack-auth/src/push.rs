use subtrack_models::UserId;
use tracing::debug;

/// Push-notification registration. Calls are fire-and-forget: an
/// implementation that needs I/O spawns it and never reports back.
pub trait PushRegistrar: Send + Sync {
    fn register(&self, user_id: UserId);
    fn unregister(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPushRegistrar;

impl PushRegistrar for NoopPushRegistrar {
    fn register(&self, user_id: UserId) {
        debug!("Push registration skipped for user {}", user_id);
    }

    fn unregister(&self) {
        debug!("Push unregistration skipped");
    }
}
