use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    CryptoSeries, EconomicIndicators, ForexSeries, MarketOverview, Portfolio, StockSeries,
    UtcDateTime, ValidationError,
};

/// The six data kinds tracked by a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Stocks,
    Crypto,
    Forex,
    Portfolio,
    Economic,
    MarketOverview,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 6] = [
        Self::Stocks,
        Self::Crypto,
        Self::Forex,
        Self::Portfolio,
        Self::Economic,
        Self::MarketOverview,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Crypto => "crypto",
            Self::Forex => "forex",
            Self::Portfolio => "portfolio",
            Self::Economic => "economic",
            Self::MarketOverview => "market_overview",
        }
    }

    /// Backend resource path segment.
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Crypto => "crypto",
            Self::Forex => "forex",
            Self::Portfolio => "portfolio",
            Self::Economic => "economic-indicators",
            Self::MarketOverview => "market-overview",
        }
    }
}

impl Display for SeriesKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidSeriesKind {
                value: value.to_owned(),
            })
    }
}

/// Where the data in a slot came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesOrigin {
    /// Decoded from a backend response.
    Live,
    /// Generated locally because the configuration is in offline mode.
    Demo,
    /// Generated locally after the backend fetch failed.
    Fallback { reason: String },
}

impl SeriesOrigin {
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
            Self::Fallback { .. } => "fallback",
        }
    }
}

/// One populated slot of a refresh result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<T> {
    pub data: T,
    pub origin: SeriesOrigin,
}

impl<T> Series<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            origin: SeriesOrigin::Live,
        }
    }

    pub fn demo(data: T) -> Self {
        Self {
            data,
            origin: SeriesOrigin::Demo,
        }
    }

    pub fn fallback(data: T, reason: impl Into<String>) -> Self {
        Self {
            data,
            origin: SeriesOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }
}

/// Aggregate of one refresh cycle. Always carries all six slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResult {
    pub cycle: u64,
    pub completed_at: UtcDateTime,
    pub stocks: Series<StockSeries>,
    pub crypto: Series<CryptoSeries>,
    pub forex: Series<ForexSeries>,
    pub portfolio: Series<Portfolio>,
    pub economic: Series<EconomicIndicators>,
    pub market_overview: Series<MarketOverview>,
}

impl RefreshResult {
    pub fn origin(&self, kind: SeriesKind) -> &SeriesOrigin {
        match kind {
            SeriesKind::Stocks => &self.stocks.origin,
            SeriesKind::Crypto => &self.crypto.origin,
            SeriesKind::Forex => &self.forex.origin,
            SeriesKind::Portfolio => &self.portfolio.origin,
            SeriesKind::Economic => &self.economic.origin,
            SeriesKind::MarketOverview => &self.market_overview.origin,
        }
    }

    pub fn fallback_kinds(&self) -> Vec<SeriesKind> {
        SeriesKind::ALL
            .into_iter()
            .filter(|kind| self.origin(*kind).is_fallback())
            .collect()
    }

    pub fn is_fully_live(&self) -> bool {
        SeriesKind::ALL
            .into_iter()
            .all(|kind| *self.origin(kind) == SeriesOrigin::Live)
    }
}
