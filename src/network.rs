//! Network and request defaults for the market-data API.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://coingeko.burjx.com";

/// Default quote currency.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Default page size for paged listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
