//! Conversion: OhlcResponse → OhlcPoint (defaults for missing fields).

use super::wire::OhlcResponse;
use super::OhlcPoint;
use rust_decimal::Decimal;

const DEFAULT_OPEN: i64 = 100;
const DEFAULT_HIGH: i64 = 105;
const DEFAULT_LOW: i64 = 95;
const DEFAULT_CLOSE: i64 = 102;

impl OhlcPoint {
    /// Fill in missing fields; a candle without a timestamp is stamped `now_ms`.
    pub(crate) fn from_response(source: OhlcResponse, now_ms: i64) -> Self {
        Self {
            time: source.time.unwrap_or(now_ms),
            open: source.open.unwrap_or(Decimal::from(DEFAULT_OPEN)),
            high: source.high.unwrap_or(Decimal::from(DEFAULT_HIGH)),
            low: source.low.unwrap_or(Decimal::from(DEFAULT_LOW)),
            close: source.close.unwrap_or(Decimal::from(DEFAULT_CLOSE)),
        }
    }
}

/// Convert a parsed series, sorted ascending by time.
pub(crate) fn convert_series(source: Vec<OhlcResponse>, now_ms: i64) -> Vec<OhlcPoint> {
    let mut series: Vec<OhlcPoint> = source
        .into_iter()
        .map(|r| OhlcPoint::from_response(r, now_ms))
        .collect();
    super::sort_by_time(&mut series);
    series
}
