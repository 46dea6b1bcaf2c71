//! Coin detail state — app-owned, SDK-provided update logic.

use super::{line_points, ChartDomain, LinePoint, OhlcPoint};
use crate::domain::coin::CoinDetail;
use crate::error::SdkError;
use crate::shared::{ChartType, CoinId, DaysParam, Envelope, TimeFrame};

const DEFAULT_ERROR: &str = "Failed to fetch OHLC data";

/// An OHLC fetch the detail state wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhlcFetch {
    pub generation: u64,
    pub coin_id: CoinId,
    pub time_frame: TimeFrame,
    pub days: DaysParam,
}

/// Outcome of resolving the coin record shown on the detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum CoinLookup {
    Pending,
    Found(CoinDetail),
    NotFound(String),
    Failed(String),
}

/// Chart and coin record for one coin, as rendered by the detail view.
///
/// The app owns instances of this type. The SDK provides update methods.
/// Changing the coin or the time frame issues a new [`OhlcFetch`]; results for
/// superseded fetches are discarded. Switching the chart type never refetches.
#[derive(Debug, Clone)]
pub struct CoinDetailState {
    coin_id: CoinId,
    lookup: CoinLookup,
    ohlc: Vec<OhlcPoint>,
    placeholder: bool,
    loading: bool,
    error: Option<String>,
    time_frame: TimeFrame,
    chart_type: ChartType,
    generation: u64,
}

impl CoinDetailState {
    pub fn new(coin_id: CoinId, time_frame: TimeFrame) -> Self {
        Self {
            coin_id,
            lookup: CoinLookup::Pending,
            ohlc: Vec::new(),
            placeholder: false,
            loading: true,
            error: None,
            time_frame,
            chart_type: ChartType::Line,
            generation: 0,
        }
    }

    /// Issue a fetch for the current coin and time frame.
    pub fn begin(&mut self) -> OhlcFetch {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        OhlcFetch {
            generation: self.generation,
            coin_id: self.coin_id.clone(),
            time_frame: self.time_frame,
            days: self.time_frame.days(),
        }
    }

    /// Show another coin. Returns `None` when `coin_id` is already shown.
    pub fn set_coin(&mut self, coin_id: CoinId) -> Option<OhlcFetch> {
        if coin_id == self.coin_id {
            return None;
        }
        tracing::info!(from = %self.coin_id, to = %coin_id, "Switching detail coin");
        self.coin_id = coin_id;
        self.lookup = CoinLookup::Pending;
        self.ohlc.clear();
        self.placeholder = false;
        Some(self.begin())
    }

    /// Returns `None` when `time_frame` is already selected.
    pub fn change_time_frame(&mut self, time_frame: TimeFrame) -> Option<OhlcFetch> {
        if time_frame == self.time_frame {
            return None;
        }
        tracing::info!(coin = %self.coin_id, from = %self.time_frame, to = %time_frame, "Switching time frame");
        self.time_frame = time_frame;
        Some(self.begin())
    }

    pub fn toggle_chart_type(&mut self) -> ChartType {
        self.chart_type = self.chart_type.toggled();
        self.chart_type
    }

    /// Commit an OHLC result. Returns `false` if the ticket was stale.
    ///
    /// A successful envelope replaces the series. A failed envelope sets
    /// `error` and keeps the previous series; its fallback data is only taken
    /// when there is nothing on screen yet. An `Err` keeps the previous series.
    pub fn apply(
        &mut self,
        fetch: &OhlcFetch,
        result: Result<Envelope<Vec<OhlcPoint>>, SdkError>,
    ) -> bool {
        if fetch.generation != self.generation {
            tracing::warn!(
                coin = %fetch.coin_id,
                time_frame = %fetch.time_frame,
                stale = fetch.generation,
                current = self.generation,
                "Discarding stale OHLC result"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(envelope) if envelope.success => {
                self.error = None;
                self.placeholder = envelope.placeholder;
                self.ohlc = envelope.data;
            }
            Ok(envelope) => {
                self.error = Some(envelope.message.unwrap_or_else(|| DEFAULT_ERROR.to_string()));
                if self.ohlc.is_empty() {
                    self.placeholder = envelope.placeholder;
                    self.ohlc = envelope.data;
                }
            }
            Err(e) => {
                tracing::warn!(coin = %fetch.coin_id, error = %e, "OHLC fetch failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Commit the coin lookup. Returns `false` if the coin changed meanwhile.
    pub fn apply_lookup(&mut self, coin_id: &CoinId, result: Result<CoinDetail, SdkError>) -> bool {
        if coin_id != &self.coin_id {
            return false;
        }
        self.lookup = match result {
            Ok(detail) => CoinLookup::Found(detail),
            Err(SdkError::NotFound(message)) => CoinLookup::NotFound(message),
            Err(e) => CoinLookup::Failed(e.to_string()),
        };
        true
    }

    pub fn coin_id(&self) -> &CoinId {
        &self.coin_id
    }

    pub fn lookup(&self) -> &CoinLookup {
        &self.lookup
    }

    pub fn detail(&self) -> Option<&CoinDetail> {
        match &self.lookup {
            CoinLookup::Found(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.lookup, CoinLookup::NotFound(_))
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn time_frame(&self) -> TimeFrame {
        self.time_frame
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the current series came from the placeholder provider.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn candles(&self) -> &[OhlcPoint] {
        &self.ohlc
    }

    pub fn line_points(&self) -> Vec<LinePoint> {
        line_points(&self.ohlc)
    }

    /// Y-axis bounds for the selected chart type.
    pub fn domain(&self) -> ChartDomain {
        match self.chart_type {
            ChartType::Line => ChartDomain::for_closes(&self.ohlc),
            ChartType::Candlestick => ChartDomain::for_candles(&self.ohlc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::test_util::coin;
    use rust_decimal::Decimal;

    fn series(closes: &[i64]) -> Vec<OhlcPoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| OhlcPoint {
                time: i as i64,
                open: Decimal::from(*c),
                high: Decimal::from(*c),
                low: Decimal::from(*c),
                close: Decimal::from(*c),
            })
            .collect()
    }

    fn state() -> CoinDetailState {
        CoinDetailState::new(CoinId::from("bitcoin"), TimeFrame::Hour1)
    }

    #[test]
    fn test_begin_uses_time_frame_days() {
        let mut state = state();
        let fetch = state.begin();
        assert_eq!(fetch.days, DaysParam::Days(1));
        assert_eq!(fetch.coin_id.as_str(), "bitcoin");
        assert!(state.loading());
    }

    #[test]
    fn test_change_time_frame_refetches_once() {
        let mut state = state();
        state.begin();
        assert!(state.change_time_frame(TimeFrame::Hour1).is_none());
        let fetch = state.change_time_frame(TimeFrame::All).unwrap();
        assert_eq!(fetch.days, DaysParam::Max);
        assert_eq!(state.time_frame(), TimeFrame::All);
    }

    #[test]
    fn test_toggle_chart_type_does_not_refetch() {
        let mut state = state();
        let fetch = state.begin();
        state.apply(&fetch, Ok(Envelope::ok(series(&[1, 2]))));
        let generation = state.generation();

        assert_eq!(state.toggle_chart_type(), ChartType::Candlestick);
        assert_eq!(state.toggle_chart_type(), ChartType::Line);
        assert_eq!(state.generation(), generation);
        assert!(!state.loading());
    }

    #[test]
    fn test_stale_time_frame_result_discarded() {
        let mut state = state();
        let day = state.change_time_frame(TimeFrame::Day1).unwrap();
        let week = state.change_time_frame(TimeFrame::Week1).unwrap();

        assert!(state.apply(&week, Ok(Envelope::ok(series(&[7, 7, 7])))));
        assert!(!state.apply(&day, Ok(Envelope::ok(series(&[1])))));
        assert_eq!(state.candles().len(), 3);
    }

    #[test]
    fn test_failed_envelope_keeps_placeholder_data() {
        let mut state = state();
        let fetch = state.begin();
        let env = Envelope::failed(series(&[100, 110]), "all attempts failed", true);
        state.apply(&fetch, Ok(env));
        assert_eq!(state.candles().len(), 2);
        assert!(state.is_placeholder());
        assert_eq!(state.error(), Some("all attempts failed"));
    }

    #[test]
    fn test_failed_envelope_keeps_previous_series() {
        let mut state = state();
        let fetch = state.begin();
        state.apply(&fetch, Ok(Envelope::ok(series(&[5, 6, 7]))));

        let fetch = state.change_time_frame(TimeFrame::Year1).unwrap();
        let env = Envelope::failed(series(&[100, 110]), "all attempts failed", true);
        assert!(state.apply(&fetch, Ok(env)));
        assert_eq!(state.candles().len(), 3);
        assert!(!state.is_placeholder());
        assert_eq!(state.error(), Some("all attempts failed"));
    }

    #[test]
    fn test_error_keeps_previous_series() {
        let mut state = state();
        let fetch = state.begin();
        state.apply(&fetch, Ok(Envelope::ok(series(&[5, 6]))));

        let fetch = state.change_time_frame(TimeFrame::Month1).unwrap();
        state.apply(&fetch, Err(SdkError::Other("offline".to_string())));
        assert_eq!(state.candles().len(), 2);
        assert_eq!(state.error(), Some("offline"));
    }

    #[test]
    fn test_chart_outputs() {
        let mut state = state();
        assert_eq!(state.domain(), ChartDomain::empty());

        let fetch = state.begin();
        state.apply(&fetch, Ok(Envelope::ok(series(&[200, 100]))));
        let points = state.line_points();
        assert_eq!(points[0].price, Decimal::from(200));
        assert_eq!(state.domain().min, Decimal::new(995, 1));
        assert_eq!(state.domain().max, Decimal::from(201));
    }

    #[test]
    fn test_candlestick_domain_covers_wicks() {
        let mut state = state();
        let fetch = state.begin();
        let candle = OhlcPoint {
            time: 1,
            open: Decimal::from(100),
            high: Decimal::from(120),
            low: Decimal::from(80),
            close: Decimal::from(101),
        };
        state.apply(&fetch, Ok(Envelope::ok(vec![candle])));
        assert_eq!(state.domain().max, Decimal::new(101505, 3));

        state.toggle_chart_type();
        let domain = state.domain();
        assert!(domain.min <= Decimal::from(80));
        assert!(domain.max >= Decimal::from(120));
    }

    #[test]
    fn test_set_coin_resets_and_lookup() {
        let mut state = state();
        assert!(state.set_coin(CoinId::from("bitcoin")).is_none());

        let fetch = state.set_coin(CoinId::from("ethereum")).unwrap();
        assert_eq!(fetch.coin_id.as_str(), "ethereum");
        assert_eq!(state.lookup(), &CoinLookup::Pending);

        // A lookup for the previous coin is ignored.
        assert!(!state.apply_lookup(
            &CoinId::from("bitcoin"),
            Ok(CoinDetail {
                coin: coin("bitcoin", Some(1), 0),
                related: vec![],
            })
        ));

        let id = CoinId::from("ethereum");
        state.apply_lookup(
            &id,
            Err(SdkError::NotFound("Coin with ID ethereum not found".to_string())),
        );
        assert!(state.is_not_found());
        assert!(state.detail().is_none());
    }
}
