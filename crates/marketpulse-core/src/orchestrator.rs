//! Refresh orchestration: six concurrent series fetches, each falling back to
//! mock data independently, joined into one [`RefreshResult`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use fastrand::Rng;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{
    mock, AvailableAssets, DashboardConfig, FetchError, HealthReport, RefreshResult, Series,
    SeriesKind, UtcDateTime, Validate,
};

/// Fetches dashboard series through an injected [`HttpClient`].
///
/// The orchestrator holds no dashboard state. Each call to
/// [`refresh`](Orchestrator::refresh) is a function of the configuration it
/// is given, the transport, and the mock RNG.
pub struct Orchestrator {
    http_client: Arc<dyn HttpClient>,
    rng: Mutex<Rng>,
    cycles: AtomicU64,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()))
    }
}

impl Orchestrator {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_rng(http_client, Rng::new())
    }

    /// Seeded mock RNG; fallback values become reproducible.
    pub fn with_seed(http_client: Arc<dyn HttpClient>, seed: u64) -> Self {
        Self::with_rng(http_client, Rng::with_seed(seed))
    }

    fn with_rng(http_client: Arc<dyn HttpClient>, rng: Rng) -> Self {
        Self {
            http_client,
            rng: Mutex::new(rng),
            cycles: AtomicU64::new(0),
        }
    }

    /// Number of completed refresh cycles.
    pub fn completed_cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Runs one refresh cycle. Never fails: every series that cannot be
    /// fetched is replaced by mock data and flagged in its origin.
    pub async fn refresh(&self, config: &DashboardConfig) -> RefreshResult {
        let started = Instant::now();
        let now = UtcDateTime::now();
        let [stocks_rng, crypto_rng, forex_rng, portfolio_rng, economic_rng, overview_rng] =
            self.fork_rngs();

        let (stocks, crypto, forex, portfolio, economic, market_overview) = tokio::join!(
            self.resolve(SeriesKind::Stocks, config, stocks_rng, |rng| {
                mock::stock_series(&config.stock_symbol, rng, now)
            }),
            self.resolve(SeriesKind::Crypto, config, crypto_rng, |rng| {
                mock::crypto_series(&config.crypto_symbol, rng, now)
            }),
            self.resolve(SeriesKind::Forex, config, forex_rng, |rng| {
                mock::forex_series(&config.forex_pair, rng, now)
            }),
            self.resolve(SeriesKind::Portfolio, config, portfolio_rng, |_| {
                mock::portfolio()
            }),
            self.resolve(SeriesKind::Economic, config, economic_rng, |_| {
                mock::economic_indicators()
            }),
            self.resolve(SeriesKind::MarketOverview, config, overview_rng, |_| {
                mock::market_overview()
            }),
        );

        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        let result = RefreshResult {
            cycle,
            completed_at: UtcDateTime::now(),
            stocks,
            crypto,
            forex,
            portfolio,
            economic,
            market_overview,
        };

        info!(
            cycle,
            fallbacks = result.fallback_kinds().len(),
            offline = config.offline,
            latency_ms = elapsed_ms(started),
            "refresh cycle completed"
        );

        result
    }

    /// Probes `{API_BASE}/health`. Errors are returned, not mocked.
    pub async fn health(&self, config: &DashboardConfig) -> Result<HealthReport, FetchError> {
        let request = probe_request("health", config);
        self.fetch_json(request).await
    }

    /// Lists `{API_BASE}/available-assets`. Errors are returned, not mocked.
    pub async fn available_assets(
        &self,
        config: &DashboardConfig,
    ) -> Result<AvailableAssets, FetchError> {
        let request = probe_request("available-assets", config);
        self.fetch_json(request).await
    }

    async fn resolve<T, F>(
        &self,
        kind: SeriesKind,
        config: &DashboardConfig,
        mut rng: Rng,
        generate: F,
    ) -> Series<T>
    where
        T: DeserializeOwned + Validate,
        F: FnOnce(&mut Rng) -> T,
    {
        if config.offline {
            return Series::demo(generate(&mut rng));
        }

        let request = series_request(kind, config);
        let url = request.full_url();
        debug!(kind = %kind, url = %url, "fetching series");

        let fetched = self
            .fetch_json::<T>(request)
            .await
            .and_then(|data| {
                data.validate()?;
                Ok(data)
            });

        match fetched {
            Ok(data) => Series::live(data),
            Err(error) => {
                warn!(
                    kind = %kind,
                    url = %url,
                    code = error.code(),
                    error = %error,
                    "series fetch failed; substituting mock data"
                );
                Series::fallback(generate(&mut rng), error.to_string())
            }
        }
    }

    async fn fetch_json<T>(&self, request: HttpRequest) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// One child RNG per series, forked up front so fallback values do not
    /// depend on the order in which fetches settle.
    fn fork_rngs(&self) -> [Rng; 6] {
        let mut parent = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        std::array::from_fn(|_| parent.fork())
    }
}

/// Builds the backend request for one series.
///
/// Stock, crypto and forex embed the configured instrument in the path. Every
/// series carries the `real` flag.
pub fn series_request(kind: SeriesKind, config: &DashboardConfig) -> HttpRequest {
    let root = config.api_root();
    let resource = kind.resource();
    let url = match kind {
        SeriesKind::Stocks => format!(
            "{root}/{resource}/{}",
            urlencoding::encode(config.stock_symbol.as_str())
        ),
        SeriesKind::Crypto => format!(
            "{root}/{resource}/{}",
            urlencoding::encode(config.crypto_symbol.as_str())
        ),
        SeriesKind::Forex => format!(
            "{root}/{resource}/{}",
            urlencoding::encode(&config.forex_pair.compact())
        ),
        SeriesKind::Portfolio | SeriesKind::Economic | SeriesKind::MarketOverview => {
            format!("{root}/{resource}")
        }
    };

    HttpRequest::get(url)
        .with_query("real", config.use_real_data.to_string())
        .with_header("accept", "application/json")
        .with_timeout_ms(config.request_timeout_ms)
}

fn probe_request(path: &str, config: &DashboardConfig) -> HttpRequest {
    HttpRequest::get(format!("{}/{path}", config.api_root()))
        .with_header("accept", "application/json")
        .with_timeout_ms(config.request_timeout_ms)
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
