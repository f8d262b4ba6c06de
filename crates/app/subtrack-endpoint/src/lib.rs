mod error;
mod http;
#[cfg(feature = "mock")]
pub mod mock;
mod transport;

pub use error::{ApiError, Result};
pub use http::HttpTransport;
pub use reqwest::Method;
pub use transport::{ApiRequest, ApiResponse, Transport};

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::info;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Centralized API endpoint manager.
///
/// Owns the current API URL and publishes a ready-to-use [`HttpTransport`]
/// through a `watch` channel whenever the URL changes. Consumers hold an
/// [`EndpointTransport`] and always talk to the latest endpoint.
pub struct EndpointManager {
    tx: watch::Sender<HttpTransport>,
    current_url: RwLock<String>,
    timeout: Duration,
}

impl EndpointManager {
    pub fn new(initial_url: &str, timeout: Duration) -> Result<Self> {
        let url = if initial_url.is_empty() {
            DEFAULT_API_URL
        } else {
            initial_url
        };

        let transport = HttpTransport::new(url, timeout)?;
        let (tx, _) = watch::channel(transport);

        Ok(Self {
            tx,
            current_url: RwLock::new(url.to_owned()),
            timeout,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<HttpTransport> {
        self.tx.subscribe()
    }

    pub fn transport(&self) -> EndpointTransport {
        EndpointTransport {
            rx: self.subscribe(),
        }
    }

    pub fn current_url(&self) -> String {
        self.current_url.read().clone()
    }

    pub fn set_backend_url(&self, url: &str) -> Result<()> {
        let transport = HttpTransport::new(url, self.timeout)?;
        *self.current_url.write() = url.to_owned();
        self.tx.send_replace(transport);
        info!("Switched API endpoint to {}", url);
        Ok(())
    }
}

/// Transport that follows the endpoint currently selected in the
/// [`EndpointManager`].
#[derive(Debug, Clone)]
pub struct EndpointTransport {
    rx: watch::Receiver<HttpTransport>,
}

impl EndpointTransport {
    pub fn base_url(&self) -> Url {
        self.rx.borrow().base_url().clone()
    }
}

#[async_trait]
impl Transport for EndpointTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let transport = self.rx.borrow().clone();
        transport.execute(request).await
    }
}
