//! # Async and Remote Key Providers
//!
//! Hardware keyrings and wallet daemons answer over a socket, so their
//! lookups are async and can fail for reasons that have nothing to do with
//! the key: a daemon restarting, a slow USB device. [`AsyncKeyProvider`] is
//! the async counterpart of [`KeyProvider`]; [`ResilientProvider`] wraps one
//! with a per-attempt timeout and bounded retries driven by
//! [`ProviderConfig`].
//!
//! Only transient errors ([`ProviderError::is_transient`]) are retried. A
//! missing key is reported on the first attempt.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use super::account::Identity;
use super::provider::{IdentitySelector, KeyProvider, ProviderError};
use crate::config::ProviderConfig;

/// Async identity lookup.
#[async_trait]
pub trait AsyncKeyProvider: Send + Sync {
    async fn fetch_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError>;
}

#[async_trait]
impl<P: AsyncKeyProvider + ?Sized> AsyncKeyProvider for Arc<P> {
    async fn fetch_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError> {
        (**self).fetch_identity(selector).await
    }
}

/// Exposes a synchronous [`KeyProvider`] through the async interface.
#[derive(Debug, Clone, Default)]
pub struct LocalProvider<P> {
    inner: P,
}

impl<P: KeyProvider> LocalProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: KeyProvider> AsyncKeyProvider for LocalProvider<P> {
    async fn fetch_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError> {
        self.inner.get_identity(selector)
    }
}

/// Adds timeouts and retries to an [`AsyncKeyProvider`].
pub struct ResilientProvider<P> {
    inner: P,
    config: ProviderConfig,
}

impl<P: AsyncKeyProvider> ResilientProvider<P> {
    pub fn new(inner: P, config: ProviderConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn attempt(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError> {
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, self.inner.fetch_identity(selector)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(timeout)),
        }
    }
}

#[async_trait]
impl<P: AsyncKeyProvider> AsyncKeyProvider for ResilientProvider<P> {
    async fn fetch_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError> {
        let attempts = self.config.attempts();
        let mut attempt = 1;

        loop {
            match self.attempt(selector).await {
                Ok(identity) => {
                    if attempt > 1 {
                        debug!(%selector, attempt, "key provider recovered");
                    }
                    return Ok(identity);
                }
                Err(e) if e.is_transient() && attempt < attempts => {
                    warn!(
                        %selector,
                        attempt,
                        max_attempts = attempts,
                        error = %e,
                        "key provider failed, retrying"
                    );
                    tokio::time::sleep(self.config.backoff()).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
