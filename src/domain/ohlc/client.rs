//! OHLC sub-client — candle series for a coin.

use super::convert::convert_series;
use super::wire::{parse_ohlc, IdParam};
use super::OhlcPoint;
use crate::client::CoinboardClient;
use crate::error::{ParseError, SdkError};
use crate::shared::{CoinId, DaysParam, Envelope};

/// Sub-client for OHLC queries.
pub struct Ohlc<'a> {
    pub(crate) client: &'a CoinboardClient,
}

impl<'a> Ohlc<'a> {
    /// Candles for `coin_id` over `days`, ascending by time.
    ///
    /// The upstream has accepted the coin id under several query parameter
    /// names. They are tried one at a time in [`IdParam::ORDER`]; the first
    /// attempt that yields a non-empty series wins. When every attempt fails
    /// the client's fallback policy applies and the message lists each failure.
    pub async fn get(
        &self,
        coin_id: &CoinId,
        days: DaysParam,
    ) -> Result<Envelope<Vec<OhlcPoint>>, SdkError> {
        let mut failures = Vec::with_capacity(IdParam::ORDER.len());

        for param in IdParam::ORDER {
            match self.attempt(param, coin_id, days).await {
                Ok(series) => {
                    tracing::debug!(
                        coin = %coin_id,
                        param = param.as_str(),
                        %days,
                        points = series.len(),
                        "Fetched OHLC series"
                    );
                    return Ok(Envelope::ok(series));
                }
                Err(e) => {
                    tracing::debug!(coin = %coin_id, param = param.as_str(), error = %e, "OHLC attempt failed");
                    failures.push(format!("{}: {}", param.as_str(), e));
                }
            }
        }

        let error = SdkError::Other(format!(
            "All OHLC requests for {} failed ({})",
            coin_id,
            failures.join("; ")
        ));
        let now_ms = chrono::Utc::now().timestamp_millis();
        self.client
            .fall_back("ohlc", error, |p| p.ohlc(days, now_ms))
    }

    async fn attempt(
        &self,
        param: IdParam,
        coin_id: &CoinId,
        days: DaysParam,
    ) -> Result<Vec<OhlcPoint>, SdkError> {
        let body = self
            .client
            .http
            .get_coin_ohlc(param, coin_id.as_str(), days)
            .await?;
        let candles = parse_ohlc(&body)?;
        let series = convert_series(candles, chrono::Utc::now().timestamp_millis());
        if series.is_empty() {
            return Err(ParseError::Empty.into());
        }
        Ok(series)
    }
}
