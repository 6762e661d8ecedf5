//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use marketpulse_core::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Scripted transport. Each route maps a URL fragment to a canned outcome;
/// unmatched requests fail like an unreachable backend. Every request URL is
/// recorded.
pub struct ScriptedHttpClient {
    routes: Vec<(String, Result<HttpResponse, HttpError>)>,
    delays: Vec<(String, Duration)>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    /// Refuses every request.
    pub fn unreachable() -> Self {
        Self {
            routes: Vec::new(),
            delays: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serves a valid payload for every series and both probes.
    pub fn healthy_backend() -> Self {
        Self::unreachable()
            .route("/stocks/", HttpResponse::ok_json(STOCKS_BODY))
            .route("/crypto/", HttpResponse::ok_json(CRYPTO_BODY))
            .route("/forex/", HttpResponse::ok_json(FOREX_BODY))
            .route("/portfolio", HttpResponse::ok_json(PORTFOLIO_BODY))
            .route("/economic-indicators", HttpResponse::ok_json(ECONOMIC_BODY))
            .route("/market-overview", HttpResponse::ok_json(OVERVIEW_BODY))
            .route("/health", HttpResponse::ok_json(HEALTH_BODY))
            .route("/available-assets", HttpResponse::ok_json(ASSETS_BODY))
    }

    /// Adds or overrides the outcome for URLs containing `fragment`.
    pub fn route(self, fragment: &str, response: HttpResponse) -> Self {
        self.respond(fragment, Ok(response))
    }

    pub fn fail(self, fragment: &str, message: &str) -> Self {
        self.respond(fragment, Err(HttpError::new(message)))
    }

    /// Holds matching requests for `delay` before answering.
    pub fn delay(mut self, fragment: &str, delay: Duration) -> Self {
        self.delays.push((fragment.to_owned(), delay));
        self
    }

    fn respond(mut self, fragment: &str, outcome: Result<HttpResponse, HttpError>) -> Self {
        self.routes.retain(|(existing, _)| existing != fragment);
        self.routes.insert(0, (fragment.to_owned(), outcome));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let url = request.full_url();
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(url.clone());

        let outcome = self
            .routes
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Err(HttpError::new("connection refused")));
        let delay = self
            .delays
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, delay)| *delay);

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            outcome
        })
    }
}

pub const STOCKS_BODY: &str = r#"{
    "symbol": "AAPL",
    "data": [
        {"date": "2024-10-14", "close": 231.3, "open": 229.0, "high": 232.1, "low": 228.7, "volume": 39882100},
        {"date": "2024-10-15", "close": 233.85}
    ],
    "currentPrice": 233.85,
    "change": 2.55,
    "changePercent": 1.1
}"#;

pub const CRYPTO_BODY: &str = r#"{
    "symbol": "BTC",
    "data": [
        {"timestamp": "2024-10-15T11:00:00Z", "price": 66000.0, "volume": 1200.5},
        {"timestamp": "2024-10-15T12:00:00Z", "price": 66330.0}
    ],
    "currentPrice": 66330.0,
    "change": 330.0,
    "changePercent": 0.5
}"#;

pub const FOREX_BODY: &str = r#"{
    "pair": "EUR/USD",
    "data": [
        {"date": "2024-10-14", "rate": 1.0912},
        {"date": "2024-10-15", "rate": 1.0894, "bid": 1.0893, "ask": 1.0895}
    ],
    "currentRate": 1.0894
}"#;

pub const PORTFOLIO_BODY: &str = r#"[
    {"asset": "Stocks", "value": 60000.0, "percentage": 60.0},
    {"asset": "Cash", "value": 40000.0, "percentage": 40.0}
]"#;

pub const ECONOMIC_BODY: &str = r#"{
    "gdp": {"value": 27360.0, "change": 2.8, "period": "Q2 2024", "unit": "B USD"},
    "unemployment": {"value": 4.1, "change": -0.1, "period": "Sep 2024"},
    "inflation": {"value": 2.4, "change": -0.1, "period": "Sep 2024"},
    "interestRate": {"value": 5.0, "change": -0.5, "period": "Sep 2024"}
}"#;

pub const OVERVIEW_BODY: &str = r#"{
    "indices": {
        "SP500": {"value": 5859.85, "change": -0.76},
        "NASDAQ": {"value": 18315.59, "change": -1.01}
    },
    "topGainers": [{"symbol": "NVDA", "price": 131.6, "change": 2.4}],
    "timestamp": "2024-10-15T20:00:00Z"
}"#;

pub const HEALTH_BODY: &str = r#"{"status": "healthy", "timestamp": "2024-10-15T20:00:00Z"}"#;

pub const ASSETS_BODY: &str = r#"{
    "stocks": ["AAPL", "MSFT"],
    "crypto": ["BTC", "ETH"],
    "forex": ["EUR/USD", "GBP/USD"]
}"#;
