use tracing::debug;

use crate::{AuthManager, LANDING_PATH, LOGIN_PATH, REGISTER_PATH, Route, RouteTable};

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(String),
}

/// Decides, once per navigation, whether the target view may be entered.
#[derive(Clone)]
pub struct AuthGate {
    auth: AuthManager,
    routes: RouteTable,
}

impl AuthGate {
    pub fn new(auth: AuthManager) -> Self {
        Self {
            auth,
            routes: RouteTable::default(),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Resolves `path` and runs [`AuthGate::navigate`] on the result.
    pub async fn navigate_path(&self, path: &str, from: Option<&str>) -> (Route, Navigation) {
        let route = self.routes.resolve(path);
        let navigation = self.navigate(&route, from).await;
        (route, navigation)
    }

    pub async fn navigate(&self, to: &Route, from: Option<&str>) -> Navigation {
        let session = self.auth.session();

        if self.auth.access_token_expired().await {
            debug!("Access token expired; ending session");
            self.auth.end_session().await;
            if !to.is_login() {
                return Navigation::Redirect(LOGIN_PATH.to_string());
            }
        }

        if session.is_logged_in() && (to.is_login() || to.is_register()) {
            return Navigation::Redirect(back_to(from));
        }

        if to.requires_auth && !session.is_logged_in() {
            if self.auth.verify_session().await {
                session.login();
                return Navigation::Proceed;
            }
            session.logout();
            return Navigation::Redirect(LOGIN_PATH.to_string());
        }

        Navigation::Proceed
    }
}

/// Previous path, unless it is missing or would bounce back into the
/// sign-in views.
fn back_to(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path) if !path.is_empty() && path != LOGIN_PATH && path != REGISTER_PATH => {
            path.to_string()
        }
        _ => LANDING_PATH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{MemoryTokenStorage, SessionStore, TokenStorage, claims::tests::token_expiring_at};
    use serde_json::json;
    use subtrack_endpoint::{Method, mock::MockTransport};
    use subtrack_notify::Notifier;

    fn gate() -> (AuthGate, Arc<MockTransport>, Arc<MemoryTokenStorage>) {
        let mock = Arc::new(MockTransport::new());
        let tokens = Arc::new(MemoryTokenStorage::new());
        let auth = AuthManager::new(
            mock.clone(),
            tokens.clone(),
            SessionStore::new(),
            Notifier::new(),
        );
        (AuthGate::new(auth), mock, tokens)
    }

    #[tokio::test]
    async fn unverified_visitor_is_sent_to_login() {
        let (gate, mock, _) = gate();
        mock.respond(Method::POST, "/auth/verify/", 401, json!({}));

        let (_, nav) = gate.navigate_path("/my-list", Some("/")).await;

        assert_eq!(nav, Navigation::Redirect("/login".to_string()));
        assert!(!gate.auth.session().is_logged_in());
        assert_eq!(mock.count(&Method::POST, "/auth/verify/"), 1);
    }

    #[tokio::test]
    async fn verified_visitor_proceeds_and_is_logged_in() {
        let (gate, mock, _) = gate();
        mock.respond(Method::POST, "/auth/verify/", 200, json!({}));

        let (_, nav) = gate.navigate_path("/budget", None).await;

        assert_eq!(nav, Navigation::Proceed);
        assert!(gate.auth.session().is_logged_in());
    }

    #[tokio::test]
    async fn logged_in_user_bounces_off_login() {
        let (gate, mock, _) = gate();
        gate.auth.session().login();

        let (_, nav) = gate.navigate_path("/login", Some("/my-list")).await;
        assert_eq!(nav, Navigation::Redirect("/my-list".to_string()));

        let (_, nav) = gate.navigate_path("/register", None).await;
        assert_eq!(nav, Navigation::Redirect("/".to_string()));

        let (_, nav) = gate.navigate_path("/register", Some("/login")).await;
        assert_eq!(nav, Navigation::Redirect("/".to_string()));

        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn logged_in_user_skips_verification() {
        let (gate, mock, _) = gate();
        gate.auth.session().login();

        let (_, nav) = gate.navigate_path("/profile", Some("/")).await;
        assert_eq!(nav, Navigation::Proceed);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn public_views_need_no_verification() {
        let (gate, mock, _) = gate();

        let (_, nav) = gate.navigate_path("/login", None).await;
        assert_eq!(nav, Navigation::Proceed);

        let (route, nav) = gate.navigate_path("/no/such/page", None).await;
        assert!(route.is_not_found());
        assert_eq!(nav, Navigation::Proceed);

        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn expired_token_ends_the_session() {
        let (gate, mock, tokens) = gate();
        tokens
            .store_access_token(&token_expiring_at(1_000))
            .await
            .unwrap();
        tokens.store_refresh_token("ref").await.unwrap();
        gate.auth.session().login();

        let (_, nav) = gate.navigate_path("/shared-list", Some("/")).await;

        assert_eq!(nav, Navigation::Redirect("/login".to_string()));
        assert!(!gate.auth.session().is_logged_in());
        assert_eq!(tokens.get_access_token().await.unwrap(), None);
        assert_eq!(tokens.get_refresh_token().await.unwrap(), None);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn expired_token_on_login_view_proceeds() {
        let (gate, _, tokens) = gate();
        tokens
            .store_access_token(&token_expiring_at(1_000))
            .await
            .unwrap();

        let (_, nav) = gate.navigate_path("/login", None).await;

        assert_eq!(nav, Navigation::Proceed);
        assert_eq!(tokens.get_access_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn live_token_is_sent_for_verification() {
        let (gate, mock, tokens) = gate();
        let token = token_expiring_at(4_000_000_000);
        tokens.store_access_token(&token).await.unwrap();
        mock.respond(Method::POST, "/auth/verify/", 200, json!({}));

        let (_, nav) = gate.navigate_path("/", None).await;

        assert_eq!(nav, Navigation::Proceed);
        let sent = mock.last(&Method::POST, "/auth/verify/").unwrap();
        assert_eq!(sent.body, Some(json!({ "token": token })));
        assert_eq!(sent.bearer.as_deref(), Some(token.as_str()));
    }
}
