//! Conversion: CoinResponse → Coin (defaults for anything missing).

use super::wire::CoinResponse;
use super::Coin;
use crate::shared::CoinId;
use rand::Rng;
use rust_decimal::Decimal;

const UNKNOWN_NAME: &str = "Unknown Coin";
const UNKNOWN_SYMBOL: &str = "???";
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Synthesize an id for a record the upstream sent without one.
fn generated_id() -> CoinId {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..7)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    CoinId::new(format!("coin-{}", suffix))
}

impl From<CoinResponse> for Coin {
    fn from(source: CoinResponse) -> Self {
        Self {
            id: source.id.map(CoinId::from).unwrap_or_else(generated_id),
            name: source.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            symbol: source.symbol.unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
            image: source.image.unwrap_or_default(),
            current_price: source.current_price.unwrap_or(Decimal::ZERO),
            price_change_percentage_24h: source
                .price_change_percentage_24h
                .unwrap_or(Decimal::ZERO),
            market_cap: source.market_cap.unwrap_or(Decimal::ZERO),
            total_volume: source.total_volume.unwrap_or(Decimal::ZERO),
            circulating_supply: source.circulating_supply.unwrap_or(Decimal::ZERO),
            market_cap_rank: source.market_cap_rank,
            ath: source.ath,
            ath_date: source.ath_date,
            last_updated: source.last_updated,
            max_supply: source.max_supply,
        }
    }
}
