//! Placeholder data — what the UI shows when the upstream fails.
//!
//! Fetch paths never build synthetic records themselves. They ask the client's
//! [`FallbackPolicy`] what to do with a failure and, under
//! [`FallbackPolicy::Placeholder`], take data from the injected
//! [`PlaceholderProvider`].

use crate::domain::coin::Coin;
use crate::domain::ohlc::OhlcPoint;
use crate::shared::{CoinId, DaysParam};
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::prelude::*;

/// One day in milliseconds.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// What a market-data call returns when the upstream fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// `success=false` with placeholder data, so views always have something to render.
    #[default]
    Placeholder,
    /// `success=false` with empty data; views render their empty state.
    Empty,
    /// Return the error to the caller.
    Propagate,
}

/// Source of synthetic market data.
///
/// Only `coins` must be provided; the tab-specific sets and OHLC series have
/// default implementations derived from it.
pub trait PlaceholderProvider: Send + Sync {
    /// `count` coins cycling through a fixed set of well-known assets.
    fn coins(&self, count: usize) -> Vec<Coin>;

    /// Coins with 24h change forced into `[5, 35]` percent.
    fn gainers(&self, count: usize) -> Vec<Coin> {
        let mut rng = rand::thread_rng();
        self.coins(count)
            .into_iter()
            .map(|mut c| {
                c.price_change_percentage_24h = to_decimal(rng.gen_range(5.0..=35.0));
                c
            })
            .collect()
    }

    /// Coins with 24h change forced into `[-35, -5]` percent.
    fn losers(&self, count: usize) -> Vec<Coin> {
        let mut rng = rand::thread_rng();
        self.coins(count)
            .into_iter()
            .map(|mut c| {
                c.price_change_percentage_24h = -to_decimal(rng.gen_range(5.0..=35.0));
                c
            })
            .collect()
    }

    /// Coins ranked `1..=count` with market cap falling off as `10^12 / rank`.
    fn top_coins(&self, count: usize) -> Vec<Coin> {
        let trillion = Decimal::from(1_000_000_000_000i64);
        self.coins(count)
            .into_iter()
            .enumerate()
            .map(|(i, mut c)| {
                let rank = i as u32 + 1;
                c.market_cap_rank = Some(rank);
                c.market_cap = (trillion / Decimal::from(rank)).round_dp(2);
                c
            })
            .collect()
    }

    /// Daily candles ending at `now_ms`, jittered ±5% around a random base price.
    ///
    /// `high >= max(open, close)` and `low <= min(open, close)` hold for every point.
    fn ohlc(&self, days: DaysParam, now_ms: i64) -> Vec<OhlcPoint> {
        let mut rng = rand::thread_rng();
        let len = days.placeholder_len() as i64;
        let base = 10_000.0 + rng.gen::<f64>() * 30_000.0;
        let volatility = base * 0.05;

        (0..len)
            .map(|i| {
                let open = base + (rng.gen::<f64>() - 0.5) * volatility;
                let close = open + (rng.gen::<f64>() - 0.5) * volatility;
                let high = open.max(close) + rng.gen::<f64>() * volatility * 0.5;
                let low = open.min(close) - rng.gen::<f64>() * volatility * 0.5;
                OhlcPoint {
                    time: now_ms - (len - i) * DAY_MS,
                    open: to_decimal(open),
                    high: to_decimal(high),
                    low: to_decimal(low),
                    close: to_decimal(close),
                }
            })
            .collect()
    }
}

/// Round to cents. Rounding is monotonic, so OHLC ordering survives it.
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}

struct Template {
    id: &'static str,
    name: &'static str,
    symbol: &'static str,
    image: &'static str,
}

const TEMPLATES: [Template; 8] = [
    Template {
        id: "bitcoin",
        name: "Bitcoin",
        symbol: "btc",
        image: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
    },
    Template {
        id: "ethereum",
        name: "Ethereum",
        symbol: "eth",
        image: "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
    },
    Template {
        id: "tether",
        name: "Tether",
        symbol: "usdt",
        image: "https://assets.coingecko.com/coins/images/325/large/Tether.png",
    },
    Template {
        id: "ripple",
        name: "XRP",
        symbol: "xrp",
        image: "https://assets.coingecko.com/coins/images/44/large/xrp.png",
    },
    Template {
        id: "binancecoin",
        name: "Binance Coin",
        symbol: "bnb",
        image: "https://assets.coingecko.com/coins/images/825/large/bnb-icon2_2x.png",
    },
    Template {
        id: "cardano",
        name: "Cardano",
        symbol: "ada",
        image: "https://assets.coingecko.com/coins/images/975/large/cardano.png",
    },
    Template {
        id: "solana",
        name: "Solana",
        symbol: "sol",
        image: "https://assets.coingecko.com/coins/images/4128/large/solana.png",
    },
    Template {
        id: "polkadot",
        name: "Polkadot",
        symbol: "dot",
        image: "https://assets.coingecko.com/coins/images/12171/large/polkadot.png",
    },
];

/// Default provider: a stable 8-asset template cycle with randomized figures.
///
/// Ids repeat the template id for the first cycle and gain a `-{index}` suffix
/// afterwards, so a batch never contains duplicate ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlaceholders;

impl PlaceholderProvider for RandomPlaceholders {
    fn coins(&self, count: usize) -> Vec<Coin> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let ath_date = DateTime::<Utc>::from_timestamp_millis(1_636_554_251_849);

        (0..count)
            .map(|i| {
                let template = &TEMPLATES[i % TEMPLATES.len()];
                let base = 1_000.0 + rng.gen::<f64>() * 50_000.0;
                let change = rng.gen::<f64>() * 10.0 - 5.0;
                let id = if i >= TEMPLATES.len() {
                    format!("{}-{}", template.id, i)
                } else {
                    template.id.to_string()
                };

                Coin {
                    id: CoinId::new(id),
                    name: template.name.to_string(),
                    symbol: template.symbol.to_string(),
                    image: template.image.to_string(),
                    current_price: to_decimal(base),
                    price_change_percentage_24h: to_decimal(change),
                    market_cap: to_decimal(base * 1_000_000.0),
                    total_volume: to_decimal(base * 100_000.0),
                    circulating_supply: Decimal::from(1_000_000 + i as i64 * 1_000_000),
                    market_cap_rank: Some(i as u32 + 1),
                    ath: Some(to_decimal(base * 1.5)),
                    ath_date,
                    last_updated: Some(now),
                    max_supply: Some(Decimal::from(21_000_000)),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::dedupe_by_id;

    #[test]
    fn test_coins_cycle_templates_with_unique_ids() {
        let coins = RandomPlaceholders.coins(10);
        assert_eq!(coins.len(), 10);
        assert_eq!(coins[0].id.as_str(), "bitcoin");
        assert_eq!(coins[7].id.as_str(), "polkadot");
        assert_eq!(coins[8].id.as_str(), "bitcoin-8");
        assert_eq!(coins[9].name, "Ethereum");
        assert_eq!(dedupe_by_id(coins.clone()).len(), 10);
    }

    #[test]
    fn test_coins_figures_in_range() {
        for coin in RandomPlaceholders.coins(16) {
            assert!(coin.current_price >= Decimal::from(1_000));
            assert!(coin.current_price <= Decimal::from(51_000));
            assert!(coin.price_change_percentage_24h.abs() <= Decimal::from(5));
        }
    }

    #[test]
    fn test_gainers_and_losers_magnitudes() {
        for coin in RandomPlaceholders.gainers(12) {
            let c = coin.price_change_percentage_24h;
            assert!(c >= Decimal::from(5) && c <= Decimal::from(35), "{c}");
        }
        for coin in RandomPlaceholders.losers(12) {
            let c = coin.price_change_percentage_24h;
            assert!(c <= Decimal::from(-5) && c >= Decimal::from(-35), "{c}");
        }
    }

    #[test]
    fn test_top_coins_ranked() {
        let coins = RandomPlaceholders.top_coins(4);
        let ranks: Vec<_> = coins.iter().map(|c| c.market_cap_rank).collect();
        assert_eq!(ranks, [Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(coins[0].market_cap, Decimal::from(1_000_000_000_000i64));
        assert_eq!(coins[3].market_cap, Decimal::from(250_000_000_000i64));
    }

    #[test]
    fn test_ohlc_shape_and_invariants() {
        let now = 1_700_000_000_000;
        let series = RandomPlaceholders.ohlc(DaysParam::Days(30), now);
        assert_eq!(series.len(), 30);
        assert_eq!(series[0].time, now - 30 * DAY_MS);
        assert_eq!(series[29].time, now - DAY_MS);
        for window in series.windows(2) {
            assert!(window[0].time < window[1].time);
        }
        for p in &series {
            assert!(p.high >= p.open.max(p.close));
            assert!(p.low <= p.open.min(p.close));
        }
    }

    #[test]
    fn test_ohlc_max_is_non_empty() {
        assert_eq!(RandomPlaceholders.ohlc(DaysParam::Max, 0).len(), 365);
    }
}
