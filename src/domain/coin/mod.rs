//! Coin domain — canonical coin records, ranking, deduplication.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod table;
pub mod wire;

pub use state::{CoinListState, ListFetch};
pub use table::{SortDirection, SortKey, TableSort};

use crate::shared::CoinId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A normalized coin record, ready for presentation.
///
/// Numeric fields are always finite: normalization substitutes zero for
/// anything the upstream left out or sent as garbage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub current_price: Decimal,
    pub price_change_percentage_24h: Decimal,
    pub market_cap: Decimal,
    pub total_volume: Decimal,
    pub circulating_supply: Decimal,
    /// `None` means unranked; sorts after every ranked coin.
    pub market_cap_rank: Option<u32>,
    pub ath: Option<Decimal>,
    pub ath_date: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub max_supply: Option<Decimal>,
}

impl Coin {
    /// Whether the 24h change is non-negative (drives up/down colouring).
    pub fn is_up(&self) -> bool {
        self.price_change_percentage_24h >= Decimal::ZERO
    }

    /// Ticker symbol in upper case, as displayed.
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }
}

/// A coin together with the related coins shown beside it on the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinDetail {
    pub coin: Coin,
    pub related: Vec<Coin>,
}

/// Compare by market-cap rank ascending, unranked last.
pub fn cmp_rank(a: &Coin, b: &Coin) -> Ordering {
    match (a.market_cap_rank, b.market_cap_rank) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by rank ascending (unranked last).
pub fn sort_by_rank(coins: &mut [Coin]) {
    coins.sort_by(cmp_rank);
}

/// Stable sort by 24h change, descending (`gainers`) or ascending (`losers`).
pub fn sort_by_change(coins: &mut [Coin], descending: bool) {
    coins.sort_by(|a, b| {
        let ord = a
            .price_change_percentage_24h
            .cmp(&b.price_change_percentage_24h);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

/// Drop repeated ids, keeping the first occurrence and the original order.
pub fn dedupe_by_id(coins: Vec<Coin>) -> Vec<Coin> {
    let before = coins.len();
    let mut seen: HashSet<CoinId> = HashSet::with_capacity(before);
    let unique: Vec<Coin> = coins
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .collect();
    if unique.len() != before {
        tracing::debug!(before, after = unique.len(), "Deduplicated coins");
    }
    unique
}

/// Find a coin by id in a fetched batch.
pub fn find_by_id<'a>(coins: &'a [Coin], id: &CoinId) -> Option<&'a Coin> {
    coins.iter().find(|c| &c.id == id)
}


#[cfg(test)]
mod tests {
    use super::test_util::{coin, ids};
    use super::*;

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let mut first_btc = coin("bitcoin", Some(1), 2);
        first_btc.name = "first".to_string();
        let mut second_btc = coin("bitcoin", Some(1), 2);
        second_btc.name = "second".to_string();

        let deduped = dedupe_by_id(vec![
            first_btc,
            coin("ethereum", Some(2), 1),
            second_btc,
            coin("solana", Some(5), 3),
        ]);
        assert_eq!(ids(&deduped), ["bitcoin", "ethereum", "solana"]);
        assert_eq!(deduped[0].name, "first");
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let once = dedupe_by_id(vec![
            coin("a", None, 0),
            coin("b", None, 0),
            coin("a", None, 0),
            coin("c", None, 0),
            coin("b", None, 0),
        ]);
        let twice = dedupe_by_id(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_by_rank_unranked_last() {
        let mut coins = vec![
            coin("x", None, 0),
            coin("b", Some(2), 0),
            coin("y", None, 0),
            coin("a", Some(1), 0),
        ];
        sort_by_rank(&mut coins);
        assert_eq!(ids(&coins), ["a", "b", "x", "y"]);
    }

    #[test]
    fn test_sort_by_change_both_directions() {
        let mut coins = vec![coin("a", None, 3), coin("b", None, -7), coin("c", None, 12)];
        sort_by_change(&mut coins, true);
        assert_eq!(ids(&coins), ["c", "a", "b"]);
        sort_by_change(&mut coins, false);
        assert_eq!(ids(&coins), ["b", "a", "c"]);
    }

    #[test]
    fn test_find_by_id() {
        let coins = vec![coin("a", None, 0), coin("b", None, 0)];
        assert!(find_by_id(&coins, &CoinId::from("b")).is_some());
        assert!(find_by_id(&coins, &CoinId::from("zzz")).is_none());
    }
}
