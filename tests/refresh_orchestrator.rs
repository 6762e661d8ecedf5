//! Behavior tests for a single refresh cycle.
//!
//! These verify that every cycle yields all six series, that a failing
//! series falls back without disturbing the others, and that mock data keeps
//! its fixed structure.

mod support;

use std::sync::Arc;

use marketpulse_core::{
    DashboardConfig, FetchError, HttpResponse, Orchestrator, RefreshResult, SeriesKind,
    SeriesOrigin, Symbol,
};
use support::ScriptedHttpClient;

fn orchestrator(client: &Arc<ScriptedHttpClient>, seed: u64) -> Orchestrator {
    Orchestrator::with_seed(client.clone(), seed)
}

fn assert_finite_numbers(result: &RefreshResult) {
    let stocks = &result.stocks.data;
    assert!(stocks.data.iter().all(|point| point.close.is_finite()));
    assert!(stocks.current_price.is_finite());
    assert!(stocks.change.is_finite());
    assert!(stocks.change_percent.is_finite());

    let crypto = &result.crypto.data;
    assert!(crypto.data.iter().all(|point| point.price.is_finite()));
    assert!(crypto.current_price.is_finite());
    assert!(crypto.change_percent.is_finite());

    let forex = &result.forex.data;
    assert!(forex.data.iter().all(|point| point.rate.is_finite()));
    assert!(forex.current_rate.is_finite());
}

// =============================================================================
// Backend unreachable
// =============================================================================

#[tokio::test]
async fn when_backend_is_unreachable_every_series_falls_back_to_mock_data() {
    // Given: No backend at all
    let client = Arc::new(ScriptedHttpClient::unreachable());
    let orchestrator = orchestrator(&client, 7);

    // When: A refresh runs for AAPL
    let config = DashboardConfig::default();
    let result = orchestrator.refresh(&config).await;

    // Then: All six slots are populated with mock data of the fixed shape
    assert_eq!(result.fallback_kinds(), SeriesKind::ALL.to_vec());
    assert_eq!(result.stocks.data.symbol, "AAPL");
    assert_eq!(result.stocks.data.data.len(), 30);
    assert_eq!(result.crypto.data.symbol, "BTC");
    assert_eq!(result.crypto.data.data.len(), 24);
    assert_eq!(result.forex.data.pair, "EUR/USD");
    assert_eq!(result.forex.data.data.len(), 30);
    assert!(!result.portfolio.data.allocations().is_empty());
    assert_eq!(result.market_overview.data.indices.len(), 3);
    assert_finite_numbers(&result);

    // And: The fallback reason carries the transport failure
    match result.origin(SeriesKind::Stocks) {
        SeriesOrigin::Fallback { reason } => assert!(reason.contains("connection refused")),
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn when_backend_is_unreachable_cycle_still_counts() {
    let client = Arc::new(ScriptedHttpClient::unreachable());
    let orchestrator = orchestrator(&client, 1);
    let config = DashboardConfig::default();

    let first = orchestrator.refresh(&config).await;
    let second = orchestrator.refresh(&config).await;

    assert_eq!(first.cycle, 1);
    assert_eq!(second.cycle, 2);
    assert_eq!(orchestrator.completed_cycles(), 2);
    assert!(second.completed_at >= first.completed_at);
}

// =============================================================================
// Live data
// =============================================================================

#[tokio::test]
async fn when_backend_serves_all_series_result_is_fully_live() {
    // Given: A backend that answers every route
    let client = Arc::new(ScriptedHttpClient::healthy_backend());
    let orchestrator = orchestrator(&client, 3);

    // When: A refresh runs
    let result = orchestrator.refresh(&DashboardConfig::default()).await;

    // Then: Every slot holds the decoded payload
    assert!(result.is_fully_live());
    assert_eq!(result.stocks.data.current_price, 233.85);
    assert_eq!(result.stocks.data.data[0].volume, Some(39_882_100));
    assert_eq!(result.crypto.data.data.len(), 2);
    assert_eq!(result.forex.data.data[1].bid, Some(1.0893));
    assert_eq!(result.portfolio.data.total_value(), 100_000.0);
    assert_eq!(result.economic.data.gdp.unit.as_deref(), Some("B USD"));
    assert_eq!(result.market_overview.data.top_gainers[0].symbol, "NVDA");
}

#[tokio::test]
async fn refresh_issues_one_request_per_series_with_real_flag() {
    let client = Arc::new(ScriptedHttpClient::healthy_backend());
    let orchestrator = orchestrator(&client, 3);
    let config = DashboardConfig {
        stock_symbol: Symbol::parse("MSFT").expect("valid symbol"),
        use_real_data: true,
        ..DashboardConfig::default()
    };

    orchestrator.refresh(&config).await;

    let mut requests = client.requests();
    requests.sort();
    assert_eq!(
        requests,
        vec![
            "http://localhost:5000/api/crypto/BTC?real=true",
            "http://localhost:5000/api/economic-indicators?real=true",
            "http://localhost:5000/api/forex/EURUSD?real=true",
            "http://localhost:5000/api/market-overview?real=true",
            "http://localhost:5000/api/portfolio?real=true",
            "http://localhost:5000/api/stocks/MSFT?real=true",
        ]
    );
}

// =============================================================================
// Per-series fallback isolation
// =============================================================================

#[tokio::test]
async fn when_one_series_fails_only_that_series_falls_back() {
    // Given: Stocks answer 500, crypto answers HTML, forex answers an empty series
    let client = Arc::new(
        ScriptedHttpClient::healthy_backend()
            .route("/stocks/", HttpResponse::with_status(500, "{}"))
            .route("/crypto/", HttpResponse::ok_json("<html>maintenance</html>"))
            .route(
                "/forex/",
                HttpResponse::ok_json(r#"{"pair":"EUR/USD","data":[],"currentRate":1.09}"#),
            ),
    );
    let orchestrator = orchestrator(&client, 5);

    // When: A refresh runs
    let result = orchestrator.refresh(&DashboardConfig::default()).await;

    // Then: Exactly the three broken series fell back, each with its own reason
    assert_eq!(
        result.fallback_kinds(),
        vec![SeriesKind::Stocks, SeriesKind::Crypto, SeriesKind::Forex]
    );
    let reason = |kind: SeriesKind| match result.origin(kind) {
        SeriesOrigin::Fallback { reason } => reason.clone(),
        other => panic!("expected fallback for {kind}, got {other:?}"),
    };
    assert!(reason(SeriesKind::Stocks).contains("status 500"));
    assert!(reason(SeriesKind::Crypto).contains("not valid JSON"));
    assert!(reason(SeriesKind::Forex).contains("at least one point"));

    // And: The fallback data has the mock shape
    assert_eq!(result.stocks.data.data.len(), 30);
    assert_eq!(result.crypto.data.data.len(), 24);
    assert_eq!(result.forex.data.data.len(), 30);

    // And: The healthy series are untouched
    assert_eq!(result.portfolio.origin, SeriesOrigin::Live);
    assert_eq!(result.portfolio.data.total_value(), 100_000.0);
    assert_eq!(result.economic.origin, SeriesOrigin::Live);
    assert_eq!(result.market_overview.origin, SeriesOrigin::Live);
}

#[tokio::test]
async fn when_payload_has_non_finite_numbers_series_falls_back() {
    let client = Arc::new(ScriptedHttpClient::healthy_backend().route(
        "/portfolio",
        HttpResponse::ok_json(r#"[{"asset":"Stocks","value":1e400,"percentage":100.0}]"#),
    ));
    let orchestrator = orchestrator(&client, 5);

    let result = orchestrator.refresh(&DashboardConfig::default()).await;

    assert_eq!(result.fallback_kinds(), vec![SeriesKind::Portfolio]);
    assert_eq!(result.portfolio.data.allocations().len(), 5);
}

// =============================================================================
// Mock determinism and offline mode
// =============================================================================

#[tokio::test]
async fn same_seed_reproduces_fallback_values() {
    let client = Arc::new(ScriptedHttpClient::unreachable());
    let config = DashboardConfig::default();

    let first = orchestrator(&client, 99).refresh(&config).await;
    let second = orchestrator(&client, 99).refresh(&config).await;
    let other = orchestrator(&client, 100).refresh(&config).await;

    let closes = |result: &RefreshResult| {
        result
            .stocks
            .data
            .data
            .iter()
            .map(|point| point.close)
            .collect::<Vec<_>>()
    };
    let prices = |result: &RefreshResult| {
        result
            .crypto
            .data
            .data
            .iter()
            .map(|point| point.price)
            .collect::<Vec<_>>()
    };

    assert_eq!(closes(&first), closes(&second));
    assert_eq!(prices(&first), prices(&second));
    assert_ne!(closes(&first), closes(&other));
}

#[tokio::test]
async fn offline_mode_serves_demo_data_without_requests() {
    // Given: An offline configuration and a backend that would answer
    let client = Arc::new(ScriptedHttpClient::healthy_backend());
    let orchestrator = orchestrator(&client, 11);
    let config = DashboardConfig {
        offline: true,
        ..DashboardConfig::default()
    };

    // When: A refresh runs
    let result = orchestrator.refresh(&config).await;

    // Then: Nothing hit the network and every slot is demo data
    assert_eq!(client.request_count(), 0);
    assert!(SeriesKind::ALL
        .into_iter()
        .all(|kind| *result.origin(kind) == SeriesOrigin::Demo));
    assert!(result.fallback_kinds().is_empty());
    assert_eq!(result.stocks.data.data.len(), 30);
    assert_finite_numbers(&result);
}

// =============================================================================
// Backend probes
// =============================================================================

#[tokio::test]
async fn probes_decode_backend_answers() {
    let client = Arc::new(ScriptedHttpClient::healthy_backend());
    let orchestrator = orchestrator(&client, 1);
    let config = DashboardConfig::default();

    let health = orchestrator.health(&config).await.expect("health probe");
    assert!(health.is_healthy());

    let assets = orchestrator
        .available_assets(&config)
        .await
        .expect("asset listing");
    assert_eq!(assets.crypto, vec!["BTC", "ETH"]);
    assert_eq!(
        client.requests(),
        vec![
            "http://localhost:5000/api/health",
            "http://localhost:5000/api/available-assets",
        ]
    );
}

#[tokio::test]
async fn probes_surface_errors_instead_of_mocking() {
    let client = Arc::new(
        ScriptedHttpClient::unreachable()
            .route("/available-assets", HttpResponse::with_status(503, "")),
    );
    let orchestrator = orchestrator(&client, 1);
    let config = DashboardConfig::default();

    let health = orchestrator
        .health(&config)
        .await
        .expect_err("unreachable backend");
    assert!(matches!(health, FetchError::Transport(_)));
    assert_eq!(health.code(), "fetch.transport");

    let assets = orchestrator
        .available_assets(&config)
        .await
        .expect_err("unavailable backend");
    assert!(matches!(assets, FetchError::Status { status: 503 }));
}
