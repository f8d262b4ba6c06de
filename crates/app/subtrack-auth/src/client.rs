use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use subtrack_endpoint::{ApiRequest, Result, Transport};
use subtrack_models::{Credentials, RefreshRequest, TokenPair, UserProfile, VerifyRequest};

/// Thin typed wrapper over the account endpoints.
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn Transport>,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair> {
        let request = ApiRequest::post("/auth/login/").with_json(credentials)?;
        self.send_for_tokens(request).await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<TokenPair> {
        let request = ApiRequest::post("/auth/register/").with_json(credentials)?;
        self.send_for_tokens(request).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.transport
            .execute(ApiRequest::post("/auth/logout/"))
            .await?;
        Ok(())
    }

    pub async fn verify(&self, token: Option<String>) -> Result<()> {
        let request = ApiRequest::post("/auth/verify/").with_json(&VerifyRequest { token })?;
        self.transport.execute(request).await?;
        Ok(())
    }

    pub async fn refresh(&self, refresh: impl Into<String>) -> Result<TokenPair> {
        let request = ApiRequest::post("/auth/refresh/").with_json(&RefreshRequest {
            refresh: refresh.into(),
        })?;
        self.send_for_tokens(request).await
    }

    pub async fn profile(&self) -> Result<UserProfile> {
        self.transport
            .execute(ApiRequest::get("/user/profile"))
            .await?
            .json()
    }

    async fn send_for_tokens(&self, request: ApiRequest) -> Result<TokenPair> {
        let response = self.transport.execute(request).await?;
        decode_or_default(response.body)
    }
}

/// Cookie-based deployments answer auth calls with an empty body.
fn decode_or_default<T: DeserializeOwned + Default>(body: Value) -> Result<T> {
    match body {
        Value::Null => Ok(T::default()),
        Value::String(ref s) if s.is_empty() => Ok(T::default()),
        body => serde_json::from_value(body).map_err(subtrack_endpoint::ApiError::Decode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use subtrack_endpoint::{Method, mock::MockTransport};

    fn credentials() -> Credentials {
        Credentials {
            username: "ada".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn login_posts_credentials_and_reads_tokens() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::POST,
            "/auth/login/",
            200,
            json!({"access": "a", "refresh": "r"}),
        );
        let client = AuthClient::new(mock.clone());

        let tokens = client.login(&credentials()).await.unwrap();
        assert_eq!(tokens.access.as_deref(), Some("a"));
        assert_eq!(tokens.refresh.as_deref(), Some("r"));

        let sent = mock.last(&Method::POST, "/auth/login/").unwrap();
        assert_eq!(
            sent.body,
            Some(json!({"username": "ada", "password": "hunter2"}))
        );
    }

    #[tokio::test]
    async fn empty_token_body_is_accepted() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::POST, "/auth/register/", 201, Value::Null);
        let client = AuthClient::new(mock);

        let tokens = client.register(&credentials()).await.unwrap();
        assert_eq!(tokens, TokenPair::default());
    }

    #[tokio::test]
    async fn verify_omits_missing_token() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::POST, "/auth/verify/", 200, json!({}));
        let client = AuthClient::new(mock.clone());

        client.verify(None).await.unwrap();
        let sent = mock.last(&Method::POST, "/auth/verify/").unwrap();
        assert_eq!(sent.body, Some(json!({})));

        client.verify(Some("t".to_string())).await.unwrap();
        let sent = mock.last(&Method::POST, "/auth/verify/").unwrap();
        assert_eq!(sent.body, Some(json!({"token": "t"})));
    }

    #[tokio::test]
    async fn server_error_detail_is_kept() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::POST,
            "/auth/login/",
            401,
            json!({"error": "Invalid credentials"}),
        );
        let client = AuthClient::new(mock);

        let err = client.login(&credentials()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(
            subtrack_notify::ErrorDetail::detail(&err),
            Some("Invalid credentials")
        );
    }
}
