//! Integration tests for the market list and coin detail controllers.
//!
//! Run with:
//! ```bash
//! cargo test --test views_integration
//! ```

use mockito::{Matcher, Server, ServerGuard};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use coinboard::prelude::*;

fn client_for(server: &ServerGuard) -> CoinboardClient {
    CoinboardClient::builder()
        .base_url(&server.url())
        .page_size(2)
        .build()
        .expect("client should build")
}

fn coin(id: &str, rank: u32, change: f64) -> Value {
    json!({
        "id": id,
        "name": id,
        "symbol": id,
        "current_price": 10,
        "price_change_percentage_24h": change,
        "market_cap_rank": rank
    })
}

fn ids(coins: &[Coin]) -> Vec<&str> {
    coins.iter().map(|c| c.id.as_str()).collect()
}

async fn mock_page(server: &mut ServerGuard, page: &str, page_size: &str, body: Value) -> mockito::Mock {
    server
        .mock("GET", "/coin-prices-all")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), page.into()),
            Matcher::UrlEncoded("pageSize".into(), page_size.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

// ── Market list ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_market_list_tabs() {
    let mut server = Server::new_async().await;
    // Featured: top coins, page size 2.
    let _featured = mock_page(
        &mut server,
        "1",
        "2",
        json!([coin("ethereum", 2, 1.0), coin("bitcoin", 1, 3.0)]),
    )
    .await;
    // Gainers: ranked from a batch of 100.
    let _movers = mock_page(
        &mut server,
        "1",
        "100",
        json!([
            coin("bitcoin", 1, 3.0),
            coin("ethereum", 2, 1.0),
            coin("solana", 5, 12.0)
        ]),
    )
    .await;

    let list = MarketList::new(client_for(&server), MarketTab::Featured);
    assert!(list.start().await);
    let state = list.snapshot().await;
    assert!(!state.loading());
    assert_eq!(ids(state.coins()), ["bitcoin", "ethereum"]);

    assert!(list.change_tab(MarketTab::Gainers).await);
    let state = list.snapshot().await;
    assert_eq!(state.tab(), MarketTab::Gainers);
    assert_eq!(ids(state.coins()), ["solana", "bitcoin"]);

    // Same tab again is a no-op.
    assert!(!list.change_tab(MarketTab::Gainers).await);
}

#[tokio::test]
async fn test_market_list_load_more_requests_next_page() {
    let mut server = Server::new_async().await;
    let first = mock_page(
        &mut server,
        "1",
        "2",
        json!([coin("a", 1, 0.0), coin("b", 2, 0.0)]),
    )
    .await;
    let second = mock_page(
        &mut server,
        "2",
        "2",
        json!([coin("b", 2, 0.0), coin("c", 3, 0.0)]),
    )
    .await;
    let third = mock_page(&mut server, "3", "2", json!([])).await;

    let list = MarketList::new(client_for(&server), MarketTab::All);
    list.start().await;
    assert!(list.load_more().await);
    let state = list.snapshot().await;
    assert_eq!(ids(state.coins()), ["a", "b", "c"]);
    assert_eq!(state.page(), 2);
    assert!(state.has_more());

    assert!(list.load_more().await);
    let state = list.snapshot().await;
    assert!(!state.has_more());
    assert_eq!(state.coins().len(), 3);

    // Exhausted: no further request.
    assert!(!list.load_more().await);

    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
}

#[tokio::test]
async fn test_market_list_failure_sets_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/coin-prices-all")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let list = MarketList::new(client_for(&server), MarketTab::All);
    list.start().await;
    let state = list.snapshot().await;
    assert!(state.error().is_some());
    assert!(state.coins().is_empty());
    assert!(!state.loading());
}

#[tokio::test]
async fn test_fetch_tab_falls_back_to_listing_on_error() {
    let mut server = Server::new_async().await;
    let movers = server
        .mock("GET", "/coin-prices-all")
        .match_query(Matcher::UrlEncoded("pageSize".into(), "100".into()))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let listing = mock_page(&mut server, "1", "2", json!([coin("x", 1, -1.0)])).await;

    let client = CoinboardClient::builder()
        .base_url(&server.url())
        .page_size(2)
        .fallback_policy(FallbackPolicy::Propagate)
        .build()
        .unwrap();
    let fetch = ListFetch {
        generation: 1,
        tab: MarketTab::Losers,
        page: 1,
        reset: true,
    };
    let envelope = coinboard::views::fetch_tab(&client, &fetch).await.unwrap();

    movers.assert_async().await;
    listing.assert_async().await;
    assert_eq!(ids(&envelope.data), ["x"]);
}

// ── Coin detail ──────────────────────────────────────────────────────────────

async fn mock_detail_listing(server: &mut ServerGuard) -> mockito::Mock {
    mock_page(
        server,
        "1",
        "50",
        json!([coin("bitcoin", 1, 2.0), coin("ethereum", 2, -1.0)]),
    )
    .await
}

#[tokio::test]
async fn test_coin_detail_view_loads_chart() {
    let mut server = Server::new_async().await;
    let _listing = mock_detail_listing(&mut server).await;
    let hourly = server
        .mock("GET", "/coin-ohlc")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("productId".into(), "bitcoin".into()),
            Matcher::UrlEncoded("days".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {"time": 1000, "open": 10, "high": 12, "low": 9, "close": 100},
                {"time": 2000, "open": 11, "high": 13, "low": 10, "close": 200}
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let weekly = server
        .mock("GET", "/coin-ohlc")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("productId".into(), "bitcoin".into()),
            Matcher::UrlEncoded("days".into(), "7".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([[3000, 1, 2, 0.5, 1.5]]).to_string())
        .expect(1)
        .create_async()
        .await;

    let view = CoinDetailView::new(client_for(&server), CoinId::from("bitcoin"), TimeFrame::Hour1);
    assert!(view.start().await);

    let state = view.snapshot().await;
    assert_eq!(state.detail().map(|d| d.coin.name.as_str()), Some("bitcoin"));
    assert_eq!(state.candles().len(), 2);
    assert_eq!(state.domain().min, Decimal::new(995, 1));
    assert_eq!(state.domain().max, Decimal::from(201));
    assert_eq!(state.error(), None);

    // Toggling the chart type does not refetch.
    assert_eq!(view.toggle_chart_type().await, ChartType::Candlestick);
    assert!(view.change_time_frame(TimeFrame::Week1).await);
    let state = view.snapshot().await;
    assert_eq!(state.line_points().len(), 1);
    assert_eq!(state.chart_type(), ChartType::Candlestick);

    hourly.assert_async().await;
    weekly.assert_async().await;
}

#[tokio::test]
async fn test_coin_detail_view_retries_chart_by_rank() {
    let mut server = Server::new_async().await;
    let _listing = mock_detail_listing(&mut server).await;
    let by_name = server
        .mock("GET", "/coin-ohlc")
        .match_query(Matcher::Regex("=bitcoin&".into()))
        .with_status(500)
        .expect(3)
        .create_async()
        .await;
    let by_rank = server
        .mock("GET", "/coin-ohlc")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("productId".into(), "1".into()),
            Matcher::UrlEncoded("days".into(), "30".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([[1000, 1, 2, 0.5, 1.5], [2000, 1.5, 3, 1, 2.5]]).to_string())
        .expect(1)
        .create_async()
        .await;

    let view = CoinDetailView::new(client_for(&server), CoinId::from("bitcoin"), TimeFrame::Month1);
    assert!(view.start().await);

    by_name.assert_async().await;
    by_rank.assert_async().await;
    let state = view.snapshot().await;
    assert!(!state.is_placeholder());
    assert_eq!(state.error(), None);
    assert_eq!(state.candles().len(), 2);
}

#[tokio::test]
async fn test_coin_detail_view_not_found() {
    let mut server = Server::new_async().await;
    let _listing = mock_detail_listing(&mut server).await;
    let _ohlc = server
        .mock("GET", "/coin-ohlc")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let view = CoinDetailView::new(client_for(&server), CoinId::from("nope"), TimeFrame::Day1);
    view.start().await;

    let state = view.snapshot().await;
    assert!(state.is_not_found());
    match state.lookup() {
        CoinLookup::NotFound(message) => assert_eq!(message, "Coin with ID nope not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    // The chart still falls back to placeholder data.
    assert!(state.is_placeholder());
    assert_eq!(state.candles().len(), 1);
    assert!(state.error().is_some());
}
