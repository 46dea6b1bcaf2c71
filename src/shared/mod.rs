//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the upstream sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Newtype for coin identifiers (e.g. `"bitcoin"`, `"ethereum"`).
///
/// Unique within a fetched batch. Also the path segment of a coin detail route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a route path segment into a coin id.
    ///
    /// Trims whitespace and slashes; returns `None` for an empty segment.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        let trimmed = segment.trim().trim_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        let decoded = urlencoding::decode(trimmed)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| trimmed.to_string());
        Some(Self(decoded))
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CoinId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CoinId(s.to_string()))
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CoinId(s))
    }
}

// ─── Currency ────────────────────────────────────────────────────────────────

/// Quote currency for prices (lowercase ISO code as the upstream expects).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self("usd".to_string())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ─── DaysParam ───────────────────────────────────────────────────────────────

/// The `days` argument of an OHLC request: a day count or the full history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaysParam {
    Days(u32),
    Max,
}

impl DaysParam {
    /// Number of daily points a placeholder series spans for this request.
    pub fn placeholder_len(&self) -> u32 {
        match self {
            Self::Days(n) => *n,
            Self::Max => 365,
        }
    }
}

impl std::fmt::Display for DaysParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Days(n) => write!(f, "{}", n),
            Self::Max => write!(f, "max"),
        }
    }
}

impl From<u32> for DaysParam {
    fn from(n: u32) -> Self {
        Self::Days(n)
    }
}

// ─── TimeFrame ───────────────────────────────────────────────────────────────

/// Chart time frame selectable on the coin detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[default]
    #[serde(rename = "1H")]
    Hour1,
    #[serde(rename = "1D")]
    Day1,
    #[serde(rename = "1W")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
    #[serde(rename = "1Y")]
    Year1,
    #[serde(rename = "ALL")]
    All,
}

impl TimeFrame {
    pub const ALL_FRAMES: [TimeFrame; 6] = [
        Self::Hour1,
        Self::Day1,
        Self::Week1,
        Self::Month1,
        Self::Year1,
        Self::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour1 => "1H",
            Self::Day1 => "1D",
            Self::Week1 => "1W",
            Self::Month1 => "1M",
            Self::Year1 => "1Y",
            Self::All => "ALL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL_FRAMES
            .iter()
            .copied()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(s))
    }

    /// Upstream `days` argument for this frame. The upstream has no hourly
    /// granularity, so `1H` shares the one-day series with `1D`.
    pub fn days(&self) -> DaysParam {
        match self {
            Self::Hour1 => DaysParam::Days(1),
            Self::Day1 => DaysParam::Days(1),
            Self::Week1 => DaysParam::Days(7),
            Self::Month1 => DaysParam::Days(30),
            Self::Year1 => DaysParam::Days(365),
            Self::All => DaysParam::Max,
        }
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── ChartType ───────────────────────────────────────────────────────────────

/// Chart rendering mode on the coin detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Candlestick,
}

impl ChartType {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Line => Self::Candlestick,
            Self::Candlestick => Self::Line,
        }
    }
}

// ─── MarketTab ───────────────────────────────────────────────────────────────

/// Category tab of the market list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTab {
    #[default]
    Featured,
    Gainers,
    Losers,
    /// Plain paged listing; also where unrecognized tab names land.
    All,
}

impl MarketTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Gainers => "gainers",
            Self::Losers => "losers",
            Self::All => "all",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "featured" => Some(Self::Featured),
            "gainers" => Some(Self::Gainers),
            "losers" => Some(Self::Losers),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Parse a tab name, routing anything unrecognized to the paged listing.
    pub fn from_str_or_all(s: &str) -> Self {
        Self::from_str(s).unwrap_or(Self::All)
    }
}

impl std::fmt::Display for MarketTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Envelope ────────────────────────────────────────────────────────────────

/// Uniform result wrapper returned by every market-data call.
///
/// `data` is always readable: when `success` is `false` it holds fallback data
/// (placeholder records under the default policy), never an absent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// `true` when `data` came from the placeholder provider, not the upstream.
    #[serde(default)]
    pub placeholder: bool,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            success: true,
            message: None,
            placeholder: false,
        }
    }

    pub fn failed(data: T, message: impl Into<String>, placeholder: bool) -> Self {
        Self {
            data,
            success: false,
            message: Some(message.into()),
            placeholder,
        }
    }

    /// Successful envelope carrying placeholder data, with an explanatory note.
    pub fn substituted(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: Some(message.into()),
            placeholder: true,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            data: f(self.data),
            success: self.success,
            message: self.message,
            placeholder: self.placeholder,
        }
    }
}
