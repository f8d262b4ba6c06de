//! Token storage abstraction for the API credentials.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;

/// Where the access and refresh tokens live between requests.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    async fn store_access_token(&self, token: &str) -> Result<()>;
    async fn store_refresh_token(&self, token: &str) -> Result<()>;
    async fn get_access_token(&self) -> Result<Option<String>>;
    async fn get_refresh_token(&self) -> Result<Option<String>>;
    async fn clear_tokens(&self) -> Result<()>;
}

/// Process-local storage; tokens are gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    access: RwLock<Option<String>>,
    refresh: RwLock<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn store_access_token(&self, token: &str) -> Result<()> {
        *self.access.write() = Some(token.to_string());
        Ok(())
    }

    async fn store_refresh_token(&self, token: &str) -> Result<()> {
        *self.refresh.write() = Some(token.to_string());
        Ok(())
    }

    async fn get_access_token(&self) -> Result<Option<String>> {
        Ok(self.access.read().clone())
    }

    async fn get_refresh_token(&self) -> Result<Option<String>> {
        Ok(self.refresh.read().clone())
    }

    async fn clear_tokens(&self) -> Result<()> {
        *self.access.write() = None;
        *self.refresh.write() = None;
        Ok(())
    }
}
