//! Market table ordering — sortable columns and header-click toggling.

use super::Coin;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Rank,
    Name,
    Price,
    Change24h,
    MarketCap,
    Volume,
    Supply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

enum SortValue<'a> {
    Number(Decimal),
    Text(&'a str),
}

impl SortKey {
    fn value<'a>(&self, coin: &'a Coin) -> Option<SortValue<'a>> {
        let number = match self {
            Self::Rank => return coin.market_cap_rank.map(|r| SortValue::Number(Decimal::from(r))),
            Self::Name => return Some(SortValue::Text(&coin.name)),
            Self::Price => coin.current_price,
            Self::Change24h => coin.price_change_percentage_24h,
            Self::MarketCap => coin.market_cap,
            Self::Volume => coin.total_volume,
            Self::Supply => coin.circulating_supply,
        };
        Some(SortValue::Number(number))
    }
}

/// Current table ordering: a column and a direction.
///
/// Starts at rank ascending. Clicking the active column flips the direction;
/// clicking another column switches to it ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            key: SortKey::Rank,
            direction: SortDirection::Asc,
        }
    }
}

impl TableSort {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }

    /// Direction indicator for a column header, `None` for inactive columns.
    pub fn indicator(&self, key: SortKey) -> Option<SortDirection> {
        (self.key == key).then_some(self.direction)
    }

    /// Compare two coins under this ordering. Missing values go last when
    /// ascending and first when descending.
    pub fn compare(&self, a: &Coin, b: &Coin) -> Ordering {
        let ord = match (self.key.value(a), self.key.value(b)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(SortValue::Number(x)), Some(SortValue::Number(y))) => x.cmp(&y),
            (Some(SortValue::Text(x)), Some(SortValue::Text(y))) => x
                .to_lowercase()
                .cmp(&y.to_lowercase())
                .then_with(|| x.cmp(y)),
            _ => Ordering::Equal,
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    /// A sorted copy of `coins` (stable for equal values).
    pub fn apply(&self, coins: &[Coin]) -> Vec<Coin> {
        let mut sorted = coins.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}
