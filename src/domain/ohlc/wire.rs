//! Wire types for OHLC responses (REST).

use crate::error::{json_kind, ParseError};
use crate::shared::serde_util::{decimal_from_value, millis_from_value};
use rust_decimal::Decimal;
use serde_json::Value;

/// Query-parameter spellings the OHLC endpoint has accepted for the coin id,
/// in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdParam {
    ProductId,
    Id,
    CoinId,
}

impl IdParam {
    pub const ORDER: [IdParam; 3] = [Self::ProductId, Self::Id, Self::CoinId];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductId => "productId",
            Self::Id => "id",
            Self::CoinId => "coin_id",
        }
    }
}

/// Raw candle from the OHLC endpoint. Missing or unparseable fields are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OhlcResponse {
    pub time: Option<i64>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
}

impl OhlcResponse {
    /// Decode an object `{time, open, high, low, close}` or a tuple
    /// `[time, open, high, low, close]`. Anything else is `None`.
    pub fn from_value(item: &Value) -> Option<Self> {
        match item {
            Value::Object(map) => {
                let num = |key: &str| map.get(key).and_then(decimal_from_value);
                Some(Self {
                    time: map.get("time").and_then(millis_from_value),
                    open: num("open"),
                    high: num("high"),
                    low: num("low"),
                    close: num("close"),
                })
            }
            Value::Array(cells) if cells.len() >= 5 => Some(Self {
                time: millis_from_value(&cells[0]),
                open: decimal_from_value(&cells[1]),
                high: decimal_from_value(&cells[2]),
                low: decimal_from_value(&cells[3]),
                close: decimal_from_value(&cells[4]),
            }),
            _ => None,
        }
    }
}

/// Parse an OHLC body. Only a non-empty JSON array is accepted.
pub fn parse_ohlc(body: &Value) -> Result<Vec<OhlcResponse>, ParseError> {
    let items = body
        .as_array()
        .ok_or_else(|| ParseError::NotAnArray(json_kind(body).to_string()))?;
    if items.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(items.iter().filter_map(OhlcResponse::from_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_parse_object_candles() {
        let candles = parse_ohlc(&json!([
            {"time": 1700000000000i64, "open": 1.5, "high": "2", "low": 1, "close": 1.75}
        ]))
        .unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].time, Some(1700000000000));
        assert_eq!(candles[0].open, Some(Decimal::from_str("1.5").unwrap()));
        assert_eq!(candles[0].high, Some(Decimal::from(2)));
    }

    #[test]
    fn test_parse_tuple_candles() {
        let candles = parse_ohlc(&json!([[1700000000000i64, 10, 12, 9, 11]])).unwrap();
        assert_eq!(candles[0].time, Some(1700000000000));
        assert_eq!(candles[0].close, Some(Decimal::from(11)));
    }

    #[test]
    fn test_parse_drops_unusable_items() {
        let candles = parse_ohlc(&json!([null, [1, 2], "x", {"close": 3}])).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].time, None);
        assert_eq!(candles[0].close, Some(Decimal::from(3)));
    }

    #[test]
    fn test_parse_rejects_non_arrays_and_empty() {
        assert_eq!(
            parse_ohlc(&json!({"data": []})).unwrap_err(),
            ParseError::NotAnArray("object".to_string())
        );
        assert_eq!(parse_ohlc(&json!([])).unwrap_err(), ParseError::Empty);
    }
}
