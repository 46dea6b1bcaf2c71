//! Coin detail controller.

use crate::client::CoinboardClient;
use crate::domain::ohlc::{CoinDetailState, OhlcFetch, OhlcPoint};
use crate::error::SdkError;
use crate::shared::{ChartType, CoinId, Envelope, TimeFrame};

use async_lock::RwLock;
use std::sync::Arc;

/// Drives a [`CoinDetailState`] for the coin detail view.
#[derive(Clone)]
pub struct CoinDetailView {
    client: CoinboardClient,
    state: Arc<RwLock<CoinDetailState>>,
}

impl CoinDetailView {
    pub fn new(client: CoinboardClient, coin_id: CoinId, time_frame: TimeFrame) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(CoinDetailState::new(coin_id, time_frame))),
        }
    }

    pub fn state(&self) -> Arc<RwLock<CoinDetailState>> {
        self.state.clone()
    }

    pub async fn snapshot(&self) -> CoinDetailState {
        self.state.read().await.clone()
    }

    /// Resolve the coin and load its chart for the current time frame.
    pub async fn start(&self) -> bool {
        let fetch = self.state.write().await.begin();
        self.resolve(&fetch.coin_id).await;
        self.run(fetch).await
    }

    /// Show another coin. Returns `false` if it is already shown or the
    /// result was superseded.
    pub async fn set_coin(&self, coin_id: CoinId) -> bool {
        let Some(fetch) = self.state.write().await.set_coin(coin_id) else {
            return false;
        };
        self.resolve(&fetch.coin_id).await;
        self.run(fetch).await
    }

    pub async fn change_time_frame(&self, time_frame: TimeFrame) -> bool {
        let Some(fetch) = self.state.write().await.change_time_frame(time_frame) else {
            return false;
        };
        self.run(fetch).await
    }

    pub async fn toggle_chart_type(&self) -> ChartType {
        self.state.write().await.toggle_chart_type()
    }

    async fn resolve(&self, coin_id: &CoinId) {
        let result = self
            .client
            .coins()
            .detail(coin_id, self.client.currency())
            .await;
        if let Err(e) = &result {
            tracing::warn!(coin = %coin_id, error = %e, "Coin lookup failed");
        }
        self.state.write().await.apply_lookup(coin_id, result);
    }

    async fn run(&self, fetch: OhlcFetch) -> bool {
        tracing::debug!(coin = %fetch.coin_id, time_frame = %fetch.time_frame, "Fetching OHLC");
        let mut result = self.client.ohlc().get(&fetch.coin_id, fetch.days).await;

        // Some upstream deployments key charts by market-cap rank.
        if !has_series(&result) {
            if let Some(rank_id) = self.rank_id(&fetch.coin_id).await {
                tracing::debug!(coin = %fetch.coin_id, rank_id = %rank_id, "Retrying OHLC by rank");
                let retry = self.client.ohlc().get(&rank_id, fetch.days).await;
                if has_series(&retry) {
                    result = retry;
                }
            }
        }

        self.state.write().await.apply(&fetch, result)
    }

    /// The resolved coin's market-cap rank as an id, if it has one.
    async fn rank_id(&self, coin_id: &CoinId) -> Option<CoinId> {
        let state = self.state.read().await;
        if state.coin_id() != coin_id {
            return None;
        }
        let rank = state.detail()?.coin.market_cap_rank?;
        Some(CoinId::new(rank.to_string()))
    }
}

fn has_series(result: &Result<Envelope<Vec<OhlcPoint>>, SdkError>) -> bool {
    matches!(result, Ok(envelope) if envelope.success && !envelope.data.is_empty())
}
