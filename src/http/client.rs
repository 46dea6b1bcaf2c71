//! Low-level HTTP client — `CoinboardHttp`.
//!
//! One method per upstream endpoint. Returns raw JSON bodies; shape matching
//! and conversion to domain types happen in the sub-clients. Every request is
//! sent with caching disabled so each call observes fresh market data.

use crate::domain::ohlc::wire::IdParam;
use crate::error::{json_kind, HttpError};
use crate::http::retry::RetryPolicy;
use crate::shared::{Currency, DaysParam};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Low-level HTTP client for the market-data REST API.
#[derive(Clone)]
pub struct CoinboardHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl CoinboardHttp {
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        retry: RetryPolicy,
    ) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        #[allow(unused_mut)]
        let mut builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(timeout.unwrap_or(Duration::from_secs(30)))
                .pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client: builder.build()?,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Coins ────────────────────────────────────────────────────────────

    /// `GET /coin-prices-all?currency&page&pageSize`
    pub async fn get_coin_prices(
        &self,
        page: u32,
        page_size: u32,
        currency: &Currency,
    ) -> Result<Value, HttpError> {
        let url = format!(
            "{}/coin-prices-all?currency={}&page={}&pageSize={}",
            self.base_url,
            urlencoding::encode(currency.as_str()),
            page,
            page_size
        );
        self.get(&url).await
    }

    // ── OHLC ─────────────────────────────────────────────────────────────

    /// `GET /coin-ohlc?{param}={coin_id}&days={days}`
    pub async fn get_coin_ohlc(
        &self,
        param: IdParam,
        coin_id: &str,
        days: DaysParam,
    ) -> Result<Value, HttpError> {
        let url = format!(
            "{}/coin-ohlc?{}={}&days={}",
            self.base_url,
            param.as_str(),
            urlencoding::encode(coin_id),
            days
        );
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get(&self, url: &str) -> Result<Value, HttpError> {
        let Some(config) = self.retry.config() else {
            return self.do_get(url).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_get(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    if !config.should_retry(&e) || attempt == config.max_retries {
                        if attempt == 0 {
                            return Err(e);
                        }
                        last_error = Some(e);
                        break;
                    }

                    let delay = match &e {
                        HttpError::RateLimited {
                            retry_after_ms: Some(ms),
                        } => Duration::from_millis(*ms),
                        _ => config.delay_for_attempt(attempt),
                    };
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying request to {}",
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    last_error = Some(e);
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get(&self, url: &str) -> Result<Value, HttpError> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "Response from {}", url);

        if status.is_success() {
            let body = resp.json::<Value>().await?;
            tracing::debug!(
                kind = json_kind(&body),
                len = body.as_array().map(|a| a.len()),
                "Body from {}",
                url
            );
            return Ok(body);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}
