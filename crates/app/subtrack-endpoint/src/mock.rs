//! In-memory [`Transport`] that records every request and answers from a
//! table of canned responses. Enabled with the `mock` feature.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Notify;

use crate::{
    error::{ApiError, Result},
    transport::{ApiRequest, ApiResponse, Transport},
};

type RouteKey = (Method, String);

#[derive(Debug, Clone)]
enum Reply {
    Response { status: u16, body: Value },
    Network(String),
}

#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<RouteKey, Reply>>,
    gates: Mutex<HashMap<RouteKey, Arc<Notify>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every `method path` request with `status` and `body`.
    /// Unregistered routes answer 404.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.replies
            .lock()
            .insert((method, path.to_string()), Reply::Response { status, body });
        self
    }

    pub fn fail_network(&self, method: Method, path: &str, message: &str) -> &Self {
        self.replies.lock().insert(
            (method, path.to_string()),
            Reply::Network(message.to_string()),
        );
        self
    }

    /// Holds requests to `method path` until the returned handle is
    /// notified. The request is recorded before it blocks.
    pub fn hold(&self, method: Method, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .insert((method, path.to_string()), Arc::clone(&gate));
        gate
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.method == *method && request.path == path)
            .count()
    }

    pub fn last(&self, method: &Method, path: &str) -> Option<ApiRequest> {
        self.requests
            .lock()
            .iter()
            .rev()
            .find(|request| request.method == *method && request.path == path)
            .cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let key = (request.method.clone(), request.path.clone());
        self.requests.lock().push(request);

        let gate = self.gates.lock().get(&key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let reply = self.replies.lock().get(&key).cloned();
        match reply {
            Some(Reply::Response { status, body }) => {
                ApiResponse::new(status, body).error_for_status()
            }
            Some(Reply::Network(message)) => Err(ApiError::Network(message)),
            None => Err(ApiError::Status {
                status: 404,
                detail: None,
            }),
        }
    }
}
