use std::sync::Arc;

use subtrack_models::UserProfile;
use tokio::sync::watch;

/// What the client currently believes about the signed-in user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub profile: UserProfile,
    pub loaded: bool,
    pub logged_in: bool,
}

/// Shared session state. Every clone observes the same state, and views can
/// `subscribe` to be woken on each change.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn profile(&self) -> UserProfile {
        self.tx.borrow().profile.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.tx.borrow().loaded
    }

    pub fn is_logged_in(&self) -> bool {
        self.tx.borrow().logged_in
    }

    /// A fetched profile implies a live session.
    pub fn set_profile(&self, profile: UserProfile) {
        self.tx.send_modify(|state| {
            state.profile = profile;
            state.loaded = true;
            state.logged_in = true;
        });
    }

    pub fn login(&self) {
        self.tx.send_modify(|state| state.logged_in = true);
    }

    pub fn logout(&self) {
        self.tx.send_modify(|state| {
            state.logged_in = false;
            state.profile = UserProfile::guest();
            state.loaded = false;
        });
    }

    pub fn reset_profile(&self) {
        self.tx.send_modify(|state| {
            state.profile = UserProfile::guest();
            state.loaded = false;
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
