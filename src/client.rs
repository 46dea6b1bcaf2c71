//! High-level client — `CoinboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the fallback wiring shared by every
//! sub-client, and the accessor methods.

use crate::domain::coin::client::Coins;
use crate::domain::ohlc::client::Ohlc;
use crate::error::SdkError;
use crate::http::{CoinboardHttp, RetryPolicy};
use crate::placeholder::{FallbackPolicy, PlaceholderProvider, RandomPlaceholders};
use crate::shared::{Currency, Envelope};

use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::ohlc::client::Ohlc as OhlcClient;

/// The primary entry point for market data.
///
/// Provides nested sub-client accessors for each domain:
/// `client.coins()`, `client.ohlc()`.
#[derive(Clone)]
pub struct CoinboardClient {
    pub(crate) http: CoinboardHttp,
    pub(crate) currency: Currency,
    pub(crate) page_size: u32,
    pub(crate) fallback_policy: FallbackPolicy,
    pub(crate) placeholders: Arc<dyn PlaceholderProvider>,
}

impl CoinboardClient {
    pub fn builder() -> CoinboardClientBuilder {
        CoinboardClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn ohlc(&self) -> Ohlc<'_> {
        Ohlc { client: self }
    }

    // ── Configuration ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Quote currency used by the view controllers.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Page size used by the view controllers.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.fallback_policy
    }

    pub fn placeholders(&self) -> &dyn PlaceholderProvider {
        self.placeholders.as_ref()
    }

    /// Turn a failed fetch into what the configured [`FallbackPolicy`] asks for.
    pub(crate) fn fall_back<T: Default>(
        &self,
        operation: &'static str,
        error: SdkError,
        placeholder: impl FnOnce(&dyn PlaceholderProvider) -> T,
    ) -> Result<Envelope<T>, SdkError> {
        match self.fallback_policy {
            FallbackPolicy::Propagate => {
                tracing::warn!(operation, error = %error, "Fetch failed");
                Err(error)
            }
            FallbackPolicy::Empty => {
                tracing::warn!(operation, error = %error, "Fetch failed; returning empty data");
                Ok(Envelope::failed(T::default(), error.to_string(), false))
            }
            FallbackPolicy::Placeholder => {
                tracing::warn!(operation, error = %error, "Fetch failed; returning placeholder data");
                Ok(Envelope::failed(
                    placeholder(self.placeholders.as_ref()),
                    error.to_string(),
                    true,
                ))
            }
        }
    }
}

impl std::fmt::Debug for CoinboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinboardClient")
            .field("base_url", &self.http.base_url())
            .field("currency", &self.currency)
            .field("page_size", &self.page_size)
            .field("fallback_policy", &self.fallback_policy)
            .finish_non_exhaustive()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinboardClientBuilder {
    base_url: String,
    currency: Currency,
    page_size: u32,
    timeout: Option<Duration>,
    retry_policy: RetryPolicy,
    fallback_policy: FallbackPolicy,
    placeholders: Arc<dyn PlaceholderProvider>,
}

impl Default for CoinboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            currency: Currency::new(crate::network::DEFAULT_CURRENCY),
            page_size: crate::network::DEFAULT_PAGE_SIZE,
            timeout: None,
            retry_policy: RetryPolicy::None,
            fallback_policy: FallbackPolicy::Placeholder,
            placeholders: Arc::new(RandomPlaceholders),
        }
    }
}

impl CoinboardClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = Currency::new(currency);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Per-request timeout. Ignored on WASM, where the browser owns timeouts.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    pub fn placeholder_provider(mut self, provider: Arc<dyn PlaceholderProvider>) -> Self {
        self.placeholders = provider;
        self
    }

    pub fn build(self) -> Result<CoinboardClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Validation("base_url must not be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(SdkError::Validation("page_size must be positive".to_string()));
        }
        if self.currency.as_str().is_empty() {
            return Err(SdkError::Validation("currency must not be empty".to_string()));
        }

        Ok(CoinboardClient {
            http: CoinboardHttp::new(&self.base_url, self.timeout, self.retry_policy)?,
            currency: self.currency,
            page_size: self.page_size,
            fallback_policy: self.fallback_policy,
            placeholders: self.placeholders,
        })
    }
}
