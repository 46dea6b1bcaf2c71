//! Coins sub-client — listings, movers, top coins, detail lookup.

use super::wire::parse_listing;
use super::{find_by_id, sort_by_change, sort_by_rank, Coin, CoinDetail};
use crate::client::CoinboardClient;
use crate::error::SdkError;
use crate::placeholder::FallbackPolicy;
use crate::shared::{CoinId, Currency, Envelope};

/// Batch size fetched to rank gainers and losers from.
const MOVERS_BATCH: u32 = 100;
/// Batch size searched when resolving a coin for the detail view.
const DETAIL_BATCH: u32 = 50;
/// Number of related coins shown beside a coin.
const RELATED_COUNT: usize = 10;

const PLACEHOLDER_NOTE: &str = "Using placeholder data due to API issues";
const NO_MOVERS_NOTE: &str = "No ranked coins returned; using placeholder data";

/// A failed fetch must still carry fallback rows, so empty requests are refused.
fn require_positive(name: &str, value: usize) -> Result<(), SdkError> {
    if value == 0 {
        return Err(SdkError::Validation(format!("{} must be positive", name)));
    }
    Ok(())
}

/// Sub-client for coin listings.
pub struct Coins<'a> {
    pub(crate) client: &'a CoinboardClient,
}

impl<'a> Coins<'a> {
    /// One page of the full listing, at most `page_size` coins.
    ///
    /// Failures are handled by the client's fallback policy; under the default
    /// policy this only returns `Err` for a zero `page_size`.
    pub async fn list(
        &self,
        page: u32,
        page_size: u32,
        currency: &Currency,
    ) -> Result<Envelope<Vec<Coin>>, SdkError> {
        require_positive("page_size", page_size as usize)?;
        match self.fetch_page(page, page_size, currency).await {
            Ok(coins) => Ok(Envelope::ok(coins)),
            Err(e) => self
                .client
                .fall_back("list", e, |p| p.coins(page_size as usize)),
        }
    }

    /// The `limit` coins with the largest 24h gain out of the first 100 listed.
    pub async fn top_gainers(
        &self,
        limit: usize,
        currency: &Currency,
    ) -> Result<Envelope<Vec<Coin>>, SdkError> {
        self.movers(limit, currency, true).await
    }

    /// The `limit` coins with the largest 24h loss out of the first 100 listed.
    pub async fn top_losers(
        &self,
        limit: usize,
        currency: &Currency,
    ) -> Result<Envelope<Vec<Coin>>, SdkError> {
        self.movers(limit, currency, false).await
    }

    /// The first `limit` coins by market-cap rank, unranked coins last.
    pub async fn top_coins(
        &self,
        limit: usize,
        currency: &Currency,
    ) -> Result<Envelope<Vec<Coin>>, SdkError> {
        require_positive("limit", limit)?;
        let page_size = u32::try_from(limit).unwrap_or(u32::MAX);
        let mut coins = match self.fetch_page(1, page_size, currency).await {
            Ok(coins) => coins,
            Err(e) => {
                return match self.client.fallback_policy {
                    FallbackPolicy::Placeholder => {
                        tracing::warn!(error = %e, "top_coins failed; returning placeholder data");
                        Ok(Envelope::substituted(
                            self.client.placeholders.top_coins(limit),
                            PLACEHOLDER_NOTE,
                        ))
                    }
                    _ => self.client.fall_back("top_coins", e, |_| Vec::new()),
                };
            }
        };

        if coins.is_empty() {
            return Ok(self.substitute_empty(
                "top_coins",
                |c| c.placeholders.top_coins(limit),
                PLACEHOLDER_NOTE,
            ));
        }

        sort_by_rank(&mut coins);
        coins.truncate(limit);
        Ok(Envelope::ok(coins))
    }

    /// Resolve `id` for the detail view, with the top coins by rank as related.
    ///
    /// Not-found and listing failures are always returned as errors.
    pub async fn detail(&self, id: &CoinId, currency: &Currency) -> Result<CoinDetail, SdkError> {
        let coins = self.fetch_page(1, DETAIL_BATCH, currency).await?;
        let coin = find_by_id(&coins, id)
            .cloned()
            .ok_or_else(|| SdkError::NotFound(format!("Coin with ID {} not found", id)))?;

        let mut related = coins;
        sort_by_rank(&mut related);
        related.truncate(RELATED_COUNT);

        tracing::debug!(coin = %coin.id, related = related.len(), "Resolved coin detail");
        Ok(CoinDetail { coin, related })
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn movers(
        &self,
        limit: usize,
        currency: &Currency,
        gainers: bool,
    ) -> Result<Envelope<Vec<Coin>>, SdkError> {
        require_positive("limit", limit)?;
        let operation = if gainers { "top_gainers" } else { "top_losers" };
        let mut coins = match self.fetch_page(1, MOVERS_BATCH, currency).await {
            Ok(coins) => coins,
            Err(e) => {
                return self.client.fall_back(operation, e, |p| {
                    if gainers {
                        p.gainers(limit)
                    } else {
                        p.losers(limit)
                    }
                });
            }
        };

        sort_by_change(&mut coins, gainers);
        coins.truncate(limit);

        if coins.is_empty() {
            return Ok(self.substitute_empty(
                operation,
                |c| {
                    if gainers {
                        c.placeholders.gainers(limit)
                    } else {
                        c.placeholders.losers(limit)
                    }
                },
                NO_MOVERS_NOTE,
            ));
        }
        Ok(Envelope::ok(coins))
    }

    /// A successful but empty result: placeholder data under the default
    /// policy, otherwise the empty list as-is.
    fn substitute_empty(
        &self,
        operation: &'static str,
        placeholder: impl FnOnce(&CoinboardClient) -> Vec<Coin>,
        note: &str,
    ) -> Envelope<Vec<Coin>> {
        match self.client.fallback_policy {
            FallbackPolicy::Placeholder => {
                tracing::warn!(operation, "Upstream returned no coins; using placeholder data");
                Envelope::substituted(placeholder(self.client), note)
            }
            _ => Envelope::ok(Vec::new()),
        }
    }

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        currency: &Currency,
    ) -> Result<Vec<Coin>, SdkError> {
        let body = self
            .client
            .http
            .get_coin_prices(page, page_size, currency)
            .await?;
        let payload = parse_listing(&body)?;
        tracing::debug!(
            shape = ?payload.shape,
            count = payload.coins.len(),
            dropped = payload.dropped,
            page,
            page_size,
            "Parsed coin listing"
        );

        let mut coins: Vec<Coin> = payload.coins.into_iter().map(Coin::from).collect();
        coins.truncate(page_size as usize);
        Ok(coins)
    }
}
