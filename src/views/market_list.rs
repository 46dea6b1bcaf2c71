//! Market list controller.

use crate::client::CoinboardClient;
use crate::domain::coin::{Coin, CoinListState, ListFetch};
use crate::error::SdkError;
use crate::shared::{Envelope, MarketTab};

use async_lock::RwLock;
use std::sync::Arc;

/// Fetch the data for one list ticket.
///
/// Featured, gainers and losers use their dedicated calls; `all` pages through
/// the full listing. If a dedicated call returns `Err` the paged listing is
/// tried once instead.
pub async fn fetch_tab(
    client: &CoinboardClient,
    fetch: &ListFetch,
) -> Result<Envelope<Vec<Coin>>, SdkError> {
    let coins = client.coins();
    let currency = client.currency();
    let page_size = client.page_size();
    let limit = page_size as usize;

    let result = match fetch.tab {
        MarketTab::Featured => coins.top_coins(limit, currency).await,
        MarketTab::Gainers => coins.top_gainers(limit, currency).await,
        MarketTab::Losers => coins.top_losers(limit, currency).await,
        MarketTab::All => return coins.list(fetch.page, page_size, currency).await,
    };

    match result {
        Ok(envelope) => Ok(envelope),
        Err(e) => {
            tracing::warn!(tab = %fetch.tab, error = %e, "Tab fetch failed; falling back to listing");
            coins.list(fetch.page, page_size, currency).await
        }
    }
}

/// Drives a [`CoinListState`] for the market view.
#[derive(Clone)]
pub struct MarketList {
    client: CoinboardClient,
    state: Arc<RwLock<CoinListState>>,
}

impl MarketList {
    pub fn new(client: CoinboardClient, tab: MarketTab) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(CoinListState::new(tab))),
        }
    }

    /// Shared handle to the state, for renderers that read it directly.
    pub fn state(&self) -> Arc<RwLock<CoinListState>> {
        self.state.clone()
    }

    pub async fn snapshot(&self) -> CoinListState {
        self.state.read().await.clone()
    }

    /// Load the first page of the current tab. Also used to refresh.
    pub async fn start(&self) -> bool {
        let fetch = self.state.write().await.begin();
        self.run(fetch).await
    }

    /// Switch tabs and load the new tab. Returns `false` if nothing changed
    /// or the result was superseded.
    pub async fn change_tab(&self, tab: MarketTab) -> bool {
        let Some(fetch) = self.state.write().await.change_tab(tab) else {
            return false;
        };
        self.run(fetch).await
    }

    /// Append the next page, if one may exist and nothing is in flight.
    pub async fn load_more(&self) -> bool {
        let Some(fetch) = self.state.write().await.load_more() else {
            return false;
        };
        self.run(fetch).await
    }

    async fn run(&self, fetch: ListFetch) -> bool {
        tracing::debug!(tab = %fetch.tab, page = fetch.page, reset = fetch.reset, "Fetching coin list");
        let result = fetch_tab(&self.client, &fetch).await;
        self.state.write().await.apply(fetch, result)
    }
}
