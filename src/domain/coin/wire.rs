//! Wire types for coin listing responses (REST).
//!
//! The listing endpoint has shipped several envelope shapes and both snake_case
//! and camelCase field spellings. Shapes are matched by an ordered set of
//! strategies; alternate field spellings are folded onto the snake_case name
//! before a record is decoded.

use crate::error::{json_kind, ParseError};
use crate::shared::serde_util::{lenient_datetime, lenient_decimal, lenient_rank, lenient_string};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── Listing shapes ─────────────────────────────────────────────────────────

/// Known envelope shapes of the listing endpoint, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingShape {
    /// `[...]`
    Bare,
    /// `{"data": [...]}`
    Data,
    /// `{"coins": [...]}`
    Coins,
    /// `{"results": [...]}`
    Results,
}

impl ListingShape {
    pub const ORDER: [ListingShape; 4] = [Self::Bare, Self::Data, Self::Coins, Self::Results];

    fn key(&self) -> Option<&'static str> {
        match self {
            Self::Bare => None,
            Self::Data => Some("data"),
            Self::Coins => Some("coins"),
            Self::Results => Some("results"),
        }
    }

    /// Extract the item array if `body` has this shape.
    pub fn extract<'a>(&self, body: &'a Value) -> Option<&'a Vec<Value>> {
        match self.key() {
            None => body.as_array(),
            Some(key) => body.as_object()?.get(key)?.as_array(),
        }
    }
}

/// A listing payload matched against one of the known shapes.
#[derive(Debug, Clone)]
pub struct ListingPayload {
    pub shape: ListingShape,
    pub coins: Vec<CoinResponse>,
    /// Items that were not JSON objects or failed to decode.
    pub dropped: usize,
}

/// Parse a listing body by trying each shape in order.
pub fn parse_listing(body: &Value) -> Result<ListingPayload, ParseError> {
    let (shape, items) = ListingShape::ORDER
        .iter()
        .find_map(|shape| shape.extract(body).map(|items| (*shape, items)))
        .ok_or_else(|| ParseError::UnrecognizedShape(describe(body)))?;

    let mut coins = Vec::with_capacity(items.len());
    let mut dropped = 0;
    for item in items {
        let Some(record) = item.as_object() else {
            dropped += 1;
            continue;
        };
        match CoinResponse::deserialize(Value::Object(canonical_record(record))) {
            Ok(coin) => coins.push(coin),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping undecodable coin record");
                dropped += 1;
            }
        }
    }

    Ok(ListingPayload {
        shape,
        coins,
        dropped,
    })
}

/// Alternate spellings of coin record fields, keyed by the snake_case name.
const FIELD_SPELLINGS: &[(&str, &[&str])] = &[
    ("current_price", &["currentPrice"]),
    ("price_change_percentage_24h", &["priceChangePercentage24h"]),
    ("market_cap", &["marketCap"]),
    ("total_volume", &["totalVolume", "tradingVolume"]),
    ("circulating_supply", &["circulatingSupply"]),
    ("market_cap_rank", &["marketCapRank"]),
    ("ath_date", &["athDate"]),
    ("last_updated", &["lastUpdated"]),
    ("max_supply", &["maxSupply"]),
];

/// Rewrite a raw record so each field appears once, under its snake_case
/// name. The first non-null spelling wins, snake_case first.
pub fn canonical_record(record: &Map<String, Value>) -> Map<String, Value> {
    let mut canonical = record.clone();
    for (name, alternates) in FIELD_SPELLINGS {
        let value = std::iter::once(*name)
            .chain(alternates.iter().copied())
            .find_map(|key| record.get(key).filter(|v| !v.is_null()));
        if let Some(value) = value {
            canonical.insert(name.to_string(), value.clone());
        }
        for alternate in alternates.iter() {
            canonical.remove(*alternate);
        }
    }
    canonical
}

fn describe(body: &Value) -> String {
    match body.as_object() {
        Some(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).take(8).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        None => json_kind(body).to_string(),
    }
}

// ─── Coin record ────────────────────────────────────────────────────────────

/// Raw coin record from the listing endpoint.
///
/// Every field is optional; defaults are applied during conversion. Decode it
/// from a [`canonical_record`], which carries snake_case names only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinResponse {
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub current_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub price_change_percentage_24h: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub market_cap: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub total_volume: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub circulating_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_rank::deserialize")]
    pub market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub ath: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
    pub ath_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub max_supply: Option<Decimal>,
}
