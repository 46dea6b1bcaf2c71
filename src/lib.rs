//! # coinboard
//!
//! Data layer for a cryptocurrency market dashboard, for native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Newtypes, domain models, normalization, chart and table helpers (always available, WASM-safe)
//! 2. **Placeholder** — Synthetic data provider + the fallback policy applied when the upstream fails
//! 3. **HTTP API** — `CoinboardHttp`, one method per upstream endpoint, caching disabled
//! 4. **High-Level Client** — `CoinboardClient` with nested sub-clients
//! 5. **Views** — Async controllers driving the list and detail state with stale-result protection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinboard::prelude::*;
//!
//! let client = CoinboardClient::builder()
//!     .base_url("https://coingeko.burjx.com")
//!     .build()?;
//!
//! let page = client.coins().list(1, 20, client.currency()).await?;
//! let candles = client.ohlc().get(&CoinId::from("bitcoin"), TimeFrame::Week1.days()).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, the response envelope, display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants and request defaults.
pub mod network;

// ── Layer 2: Placeholder data ────────────────────────────────────────────────

/// Placeholder provider and fallback policy.
pub mod placeholder;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `CoinboardClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Views ───────────────────────────────────────────────────────────

/// Market list and coin detail controllers.
#[cfg(feature = "http")]
pub mod views;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{ChartType, CoinId, Currency, DaysParam, Envelope, MarketTab, TimeFrame};

    // Domain types — coin
    pub use crate::domain::coin::{
        Coin, CoinDetail, CoinListState, ListFetch, SortDirection, SortKey, TableSort,
    };

    // Domain types — ohlc
    pub use crate::domain::ohlc::{
        ChartDomain, CoinDetailState, CoinLookup, LinePoint, OhlcFetch, OhlcPoint,
    };

    // Formatting
    pub use crate::shared::fmt::{
        format_currency, format_large_number, format_percentage, format_price, percent_change,
        truncate_text,
    };

    // Placeholder data
    pub use crate::placeholder::{FallbackPolicy, PlaceholderProvider, RandomPlaceholders};

    // Errors
    pub use crate::error::{HttpError, ParseError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_CURRENCY, DEFAULT_PAGE_SIZE};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{CoinboardClient, CoinboardClientBuilder, CoinsClient, OhlcClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // View controllers
    #[cfg(feature = "http")]
    pub use crate::views::{CoinDetailView, MarketList};
}
