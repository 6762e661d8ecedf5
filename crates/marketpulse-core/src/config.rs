//! Dashboard configuration.
//!
//! [`DashboardConfig`] is owned by the caller and read by the orchestrator to
//! build request URLs and by the scheduler to pick the polling cadence.

use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::{ConfigError, ForexPair, SeriesKind, Symbol, ValidationError};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Polling period in seconds, bounded to `[10, 300]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RefreshInterval(u64);

impl RefreshInterval {
    pub const MIN_SECS: u64 = 10;
    pub const MAX_SECS: u64 = 300;
    pub const DEFAULT_SECS: u64 = 30;

    pub fn new(secs: u64) -> Result<Self, ValidationError> {
        if !(Self::MIN_SECS..=Self::MAX_SECS).contains(&secs) {
            return Err(ValidationError::RefreshIntervalOutOfRange {
                value: secs,
                min: Self::MIN_SECS,
                max: Self::MAX_SECS,
            });
        }
        Ok(Self(secs))
    }

    /// Clamp into range instead of rejecting.
    pub fn clamped(secs: u64) -> Self {
        Self(secs.clamp(Self::MIN_SECS, Self::MAX_SECS))
    }

    pub const fn as_secs(self) -> u64 {
        self.0
    }

    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self(Self::DEFAULT_SECS)
    }
}

impl TryFrom<u64> for RefreshInterval {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RefreshInterval> for u64 {
    fn from(value: RefreshInterval) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(ValidationError::InvalidTheme {
                value: value.to_owned(),
            }),
        }
    }
}

/// Full dashboard configuration.
///
/// Missing fields in a JSON document fall back to the defaults below, so a
/// config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub stock_symbol: Symbol,
    pub crypto_symbol: Symbol,
    pub forex_pair: ForexPair,
    pub refresh_interval: RefreshInterval,
    pub show_stocks: bool,
    pub show_crypto: bool,
    pub show_forex: bool,
    pub show_portfolio: bool,
    pub show_economic: bool,
    pub use_real_data: bool,
    /// Demo mode: skip the backend and generate every series locally.
    pub offline: bool,
    pub theme: Theme,
    pub api_base: String,
    pub request_timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            stock_symbol: Symbol::from_static("AAPL"),
            crypto_symbol: Symbol::from_static("BTC"),
            forex_pair: ForexPair::from_static("EUR", "USD"),
            refresh_interval: RefreshInterval::default(),
            show_stocks: true,
            show_crypto: true,
            show_forex: true,
            show_portfolio: true,
            show_economic: true,
            use_real_data: true,
            offline: false,
            theme: Theme::default(),
            api_base: String::from(DEFAULT_API_BASE),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Configuration subset whose change restarts the polling cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshKey {
    pub stock_symbol: Symbol,
    pub crypto_symbol: Symbol,
    pub forex_pair: ForexPair,
    pub refresh_interval: RefreshInterval,
    pub use_real_data: bool,
    pub offline: bool,
    pub api_base: String,
    pub request_timeout_ms: u64,
}

impl DashboardConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Checks the fields that serde cannot type-check on its own.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let base = self.api_base.trim();
        let has_scheme = base.starts_with("http://") || base.starts_with("https://");
        let has_host = base
            .split_once("://")
            .map(|(_, rest)| !rest.is_empty())
            .unwrap_or(false);
        if !has_scheme || !has_host {
            return Err(ValidationError::InvalidApiBase {
                value: self.api_base.clone(),
            });
        }

        if self.request_timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }

        Ok(())
    }

    pub fn refresh_key(&self) -> RefreshKey {
        RefreshKey {
            stock_symbol: self.stock_symbol.clone(),
            crypto_symbol: self.crypto_symbol.clone(),
            forex_pair: self.forex_pair.clone(),
            refresh_interval: self.refresh_interval,
            use_real_data: self.use_real_data,
            offline: self.offline,
            api_base: self.api_base.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }

    /// Whether a series should be presented. The market overview has no toggle.
    pub fn is_visible(&self, kind: SeriesKind) -> bool {
        match kind {
            SeriesKind::Stocks => self.show_stocks,
            SeriesKind::Crypto => self.show_crypto,
            SeriesKind::Forex => self.show_forex,
            SeriesKind::Portfolio => self.show_portfolio,
            SeriesKind::Economic => self.show_economic,
            SeriesKind::MarketOverview => true,
        }
    }

    pub fn set_visible(&mut self, kind: SeriesKind, visible: bool) {
        match kind {
            SeriesKind::Stocks => self.show_stocks = visible,
            SeriesKind::Crypto => self.show_crypto = visible,
            SeriesKind::Forex => self.show_forex = visible,
            SeriesKind::Portfolio => self.show_portfolio = visible,
            SeriesKind::Economic => self.show_economic = visible,
            SeriesKind::MarketOverview => {}
        }
    }

    /// API base without a trailing slash.
    pub fn api_root(&self) -> &str {
        self.api_base.trim().trim_end_matches('/')
    }
}
