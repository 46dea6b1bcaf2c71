//! Market list state — app-owned, SDK-provided update logic.

use super::{dedupe_by_id, Coin};
use crate::error::SdkError;
use crate::shared::{Envelope, MarketTab};

const DEFAULT_ERROR: &str = "Failed to fetch coins";

/// A fetch the list state wants performed.
///
/// Issued by [`CoinListState::begin`], [`CoinListState::change_tab`] and
/// [`CoinListState::load_more`]; hand the result back to
/// [`CoinListState::apply`] together with the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFetch {
    pub generation: u64,
    pub tab: MarketTab,
    pub page: u32,
    /// Replace the list instead of appending to it.
    pub reset: bool,
}

/// Paged, tabbed coin list as rendered by the market view.
///
/// The app owns instances of this type. The SDK provides update methods.
/// Every reset bumps the generation; results carrying an older generation are
/// discarded, so a slow fetch for a previous tab never overwrites the current one.
#[derive(Debug, Clone)]
pub struct CoinListState {
    tab: MarketTab,
    page: u32,
    coins: Vec<Coin>,
    loading: bool,
    error: Option<String>,
    has_more: bool,
    generation: u64,
}

impl CoinListState {
    pub fn new(tab: MarketTab) -> Self {
        Self {
            tab,
            page: 1,
            coins: Vec::new(),
            loading: true,
            error: None,
            has_more: true,
            generation: 0,
        }
    }

    /// Start (or restart) the current tab from its first page.
    pub fn begin(&mut self) -> ListFetch {
        self.generation += 1;
        self.page = 1;
        self.loading = true;
        self.error = None;
        self.has_more = true;
        self.ticket(1, true)
    }

    /// Switch tabs. Returns `None` when `tab` is already active.
    pub fn change_tab(&mut self, tab: MarketTab) -> Option<ListFetch> {
        if tab == self.tab {
            return None;
        }
        tracing::info!(from = %self.tab, to = %tab, "Switching market tab");
        self.tab = tab;
        self.coins.clear();
        Some(self.begin())
    }

    /// Request the next page. Returns `None` while a fetch is in flight or
    /// once a page came back empty.
    pub fn load_more(&mut self) -> Option<ListFetch> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.ticket(self.page + 1, false))
    }

    /// Commit a fetch result. Returns `false` if the ticket was stale.
    pub fn apply(
        &mut self,
        fetch: ListFetch,
        result: Result<Envelope<Vec<Coin>>, SdkError>,
    ) -> bool {
        if fetch.generation != self.generation {
            tracing::warn!(
                tab = %fetch.tab,
                page = fetch.page,
                stale = fetch.generation,
                current = self.generation,
                "Discarding stale coin list result"
            );
            return false;
        }
        self.loading = false;

        let envelope = match result {
            Ok(envelope) if envelope.success => envelope,
            Ok(envelope) => {
                let message = envelope.message.unwrap_or_else(|| DEFAULT_ERROR.to_string());
                self.fail(fetch, message);
                return true;
            }
            Err(e) => {
                self.fail(fetch, e.to_string());
                return true;
            }
        };

        let received = envelope.data.len();
        let unique = dedupe_by_id(envelope.data);
        if fetch.reset {
            self.coins = unique;
        } else {
            let mut combined = std::mem::take(&mut self.coins);
            combined.extend(unique);
            self.coins = dedupe_by_id(combined);
        }
        self.page = fetch.page;
        // Heuristic: an empty page is read as the end of the listing.
        self.has_more = received > 0;
        self.error = None;

        tracing::debug!(
            tab = %fetch.tab,
            page = fetch.page,
            received,
            total = self.coins.len(),
            "Applied coin list result"
        );
        true
    }

    fn fail(&mut self, fetch: ListFetch, message: String) {
        tracing::warn!(tab = %fetch.tab, page = fetch.page, error = %message, "Coin list fetch failed");
        if fetch.reset {
            self.coins.clear();
        }
        self.error = Some(message);
    }

    fn ticket(&self, page: u32, reset: bool) -> ListFetch {
        ListFetch {
            generation: self.generation,
            tab: self.tab,
            page,
            reset,
        }
    }

    pub fn tab(&self) -> MarketTab {
        self.tab
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
