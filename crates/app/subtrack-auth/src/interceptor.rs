use std::sync::Arc;

use async_trait::async_trait;
use subtrack_endpoint::{ApiRequest, ApiResponse, Result, Transport};
use tracing::warn;

use crate::TokenStorage;

/// Transport wrapper that attaches the stored access token as a Bearer
/// credential to every outgoing request that does not already carry one.
#[derive(Clone)]
pub struct AuthInterceptor {
    inner: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStorage>,
}

impl AuthInterceptor {
    pub fn new(inner: Arc<dyn Transport>, tokens: Arc<dyn TokenStorage>) -> Self {
        Self { inner, tokens }
    }
}

#[async_trait]
impl Transport for AuthInterceptor {
    async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        if request.bearer.is_none() {
            match self.tokens.get_access_token().await {
                Ok(Some(token)) => request.bearer = Some(token),
                Ok(None) => {}
                Err(e) => warn!("Failed to read access token: {}", e),
            }
        }
        self.inner.execute(request).await
    }
}
