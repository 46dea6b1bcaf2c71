//! OHLC domain — price history candles and chart series.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

pub use state::{CoinDetailState, CoinLookup, OhlcFetch};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One open/high/low/close candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// A single point on a line chart (the candle's close).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub price: Decimal,
}

impl From<&OhlcPoint> for LinePoint {
    fn from(p: &OhlcPoint) -> Self {
        Self {
            time: p.time,
            price: p.close,
        }
    }
}

/// Y-axis bounds for a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDomain {
    pub min: Decimal,
    pub max: Decimal,
}

impl ChartDomain {
    /// Bounds used when there is nothing to plot.
    pub fn empty() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::from(100),
        }
    }

    /// Close-price range padded by 0.5% on each side (line charts).
    pub fn for_closes(series: &[OhlcPoint]) -> Self {
        let closes = series.iter().map(|p| p.close);
        Self::padded(closes.clone().min(), closes.max())
    }

    /// Low-to-high range padded by 0.5% on each side, so wicks stay on the axis.
    pub fn for_candles(series: &[OhlcPoint]) -> Self {
        Self::padded(
            series.iter().map(|p| p.low).min(),
            series.iter().map(|p| p.high).max(),
        )
    }

    fn padded(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        let (Some(min), Some(max)) = (min, max) else {
            return Self::empty();
        };
        Self {
            min: min * Decimal::new(995, 3),
            max: max * Decimal::new(1005, 3),
        }
    }
}

/// Close prices as line-chart points, in the series' (ascending) order.
pub fn line_points(series: &[OhlcPoint]) -> Vec<LinePoint> {
    series.iter().map(LinePoint::from).collect()
}

/// Sort a series ascending by time (stable for equal timestamps).
pub fn sort_by_time(series: &mut [OhlcPoint]) {
    series.sort_by_key(|p| p.time);
}
