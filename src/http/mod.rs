//! HTTP client layer — `CoinboardHttp` with a per-client retry policy.

pub mod client;
pub mod retry;

pub use client::CoinboardHttp;
pub use retry::{RetryConfig, RetryPolicy};
