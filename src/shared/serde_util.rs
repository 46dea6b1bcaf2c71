//! Custom serde helpers for the upstream's loosely-typed wire formats.
//!
//! The market-data API is inconsistent about numeric encoding: the same field
//! may arrive as a JSON number, a numeric string, `null`, or be missing. These
//! helpers read all of those as `Option<_>` and leave defaulting to `convert`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Read a JSON number or numeric string as a `Decimal`.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            parse_decimal_str(&n.to_string())
        }
        Value::String(s) => parse_decimal_str(s.trim()),
        _ => None,
    }
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Read an epoch-millisecond timestamp: a number, a numeric string, or an
/// RFC 3339 date string.
pub fn millis_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| datetime_from_str(s).map(|dt| dt.timestamp_millis())),
        _ => None,
    }
    .filter(|ms| *ms > 0)
}

fn datetime_from_str(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `Option<Decimal>` from a number, numeric string, or null.
pub mod lenient_decimal {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::decimal_from_value(&value))
    }
}

/// Market-cap rank: positive integer, or `None` when absent, zero, or garbage.
pub mod lenient_rank {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let rank = match &value {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f > 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Ok(rank
            .filter(|r| *r > 0)
            .and_then(|r| u32::try_from(r).ok()))
    }
}

/// String fields that the upstream sometimes sends as numbers (e.g. numeric ids).
pub mod lenient_string {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

/// `Option<DateTime<Utc>>` from an RFC 3339 string or epoch millis.
pub mod lenient_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::millis_from_value(&value).and_then(DateTime::<Utc>::from_timestamp_millis))
    }
}
