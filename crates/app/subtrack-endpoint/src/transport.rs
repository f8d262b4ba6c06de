use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// A JSON request against the API, addressed by path relative to the
/// endpoint's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `Value::Null` for empty bodies.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_status(self.status, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.body).map_err(ApiError::Decode)
    }
}

/// Sends API requests. Implementations resolve non-2xx responses to
/// [`ApiError::Status`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        (**self).execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn builder_sets_method_body_and_query() {
        let request = ApiRequest::patch("/user-plans/4/toggle-usage/")
            .with_json(&json!({"track_usage": false}))
            .unwrap()
            .with_query(vec![("page".to_string(), "2".to_string())])
            .with_bearer("abc");

        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path, "/user-plans/4/toggle-usage/");
        assert_eq!(request.body, Some(json!({"track_usage": false})));
        assert_eq!(request.query.len(), 1);
        assert_eq!(request.bearer.as_deref(), Some("abc"));
    }

    #[test]
    fn non_success_status_becomes_error() {
        let response = ApiResponse::new(400, json!({"error": "nope"}));
        let err = response.error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(400));

        let response = ApiResponse::new(204, Value::Null);
        assert!(response.error_for_status().is_ok());
    }

    #[test]
    fn json_decodes_body() {
        #[derive(Debug, Deserialize)]
        struct Category {
            name: String,
        }

        let category: Category = ApiResponse::new(200, json!({"id": 1, "name": "Music"}))
            .json()
            .unwrap();
        assert_eq!(category.name, "Music");

        let err = ApiResponse::new(200, json!([])).json::<Category>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
