use std::sync::Arc;

use subtrack_endpoint::Transport;
use subtrack_models::{Credentials, TokenPair, UserProfile};
use subtrack_notify::Notifier;
use tracing::{debug, info, warn};

use crate::{
    AuthClient, AuthError, AuthInterceptor, NoopPushRegistrar, PushRegistrar, Result,
    SessionStore, TokenStorage, claims,
};

/// Account lifecycle: sign-in, sign-out, profile and session checks.
///
/// Public operations never return errors. Failures are reported through
/// the [`Notifier`] and surface as `false` or `None`.
#[derive(Clone)]
pub struct AuthManager {
    client: AuthClient,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStorage>,
    session: SessionStore,
    notifier: Notifier,
    push: Arc<dyn PushRegistrar>,
}

impl AuthManager {
    /// Wraps `transport` in an [`AuthInterceptor`] backed by `tokens`.
    pub fn new(
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStorage>,
        session: SessionStore,
        notifier: Notifier,
    ) -> Self {
        let transport: Arc<dyn Transport> =
            Arc::new(AuthInterceptor::new(transport, Arc::clone(&tokens)));
        Self {
            client: AuthClient::new(Arc::clone(&transport)),
            transport,
            tokens,
            session,
            notifier,
            push: Arc::new(NoopPushRegistrar),
        }
    }

    pub fn with_push(mut self, push: Arc<dyn PushRegistrar>) -> Self {
        self.push = push;
        self
    }

    /// The bearer-authenticated transport, for other API clients.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn login(&self, username: impl Into<String>, password: impl Into<String>) -> bool {
        let credentials = Credentials {
            username: username.into(),
            password: password.into(),
        };
        match self.client.login(&credentials).await {
            Ok(tokens) => self.complete_sign_in(tokens).await,
            Err(err) => {
                self.notifier.handle_error("Failed to log in.", &err);
                false
            }
        }
    }

    pub async fn register(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> bool {
        let credentials = Credentials {
            username: username.into(),
            password: password.into(),
        };
        match self.client.register(&credentials).await {
            Ok(tokens) => {
                if !self.complete_sign_in(tokens).await {
                    return false;
                }
                self.notifier.success("Success", "Registered successfully!");
                true
            }
            Err(err) => {
                self.notifier.handle_error("Failed to register.", &err);
                false
            }
        }
    }

    pub async fn logout(&self) -> bool {
        match self.client.logout().await {
            Ok(()) => {
                self.end_session().await;
                self.push.unregister();
                info!("Logged out");
                true
            }
            Err(err) => {
                self.notifier.handle_error("Failed to log out.", &err);
                false
            }
        }
    }

    /// Returns the cached profile when one is loaded, otherwise fetches it.
    pub async fn fetch_user_profile(&self) -> Option<UserProfile> {
        if self.session.is_loaded() {
            return Some(self.session.profile());
        }
        self.load_profile().await
    }

    /// Asks the server whether the current credentials are still good.
    /// Failures are logged, never shown.
    pub async fn verify_session(&self) -> bool {
        let token = match self.tokens.get_access_token().await {
            Ok(token) => token,
            Err(err) => {
                warn!("Failed to read access token: {}", err);
                None
            }
        };
        match self.client.verify(token).await {
            Ok(()) => true,
            Err(err) => {
                debug!("Session verification failed: {}", err);
                false
            }
        }
    }

    pub async fn refresh_tokens(&self) -> Result<()> {
        let refresh = self
            .tokens
            .get_refresh_token()
            .await?
            .ok_or(AuthError::MissingRefreshToken)?;
        let pair = self.client.refresh(refresh).await?;
        self.store_tokens(&pair).await
    }

    /// `true` when the stored access token is a JWT past its expiry.
    pub async fn access_token_expired(&self) -> bool {
        match self.tokens.get_access_token().await {
            Ok(Some(token)) => claims::is_expired(&token, chrono::Utc::now().timestamp()),
            _ => false,
        }
    }

    /// Drops the stored tokens and logs the session out locally.
    pub async fn end_session(&self) {
        if let Err(err) = self.tokens.clear_tokens().await {
            warn!("Failed to clear tokens: {}", err);
        }
        self.session.logout();
    }

    async fn complete_sign_in(&self, tokens: TokenPair) -> bool {
        if let Err(err) = self.store_tokens(&tokens).await {
            self.notifier
                .handle_error("Failed to store credentials.", &err);
            return false;
        }
        self.session.login();

        if let Some(profile) = self.load_profile().await {
            self.push.register(profile.id);
        }
        true
    }

    async fn load_profile(&self) -> Option<UserProfile> {
        match self.client.profile().await {
            Ok(profile) => {
                self.session.set_profile(profile.clone());
                Some(profile)
            }
            Err(err) => {
                self.notifier
                    .handle_error("Failed to fetch user profile.", &err);
                None
            }
        }
    }

    async fn store_tokens(&self, tokens: &TokenPair) -> Result<()> {
        if let Some(access) = &tokens.access {
            self.tokens.store_access_token(access).await?;
        }
        if let Some(refresh) = &tokens.refresh {
            self.tokens.store_refresh_token(refresh).await?;
        }
        Ok(())
    }
}
