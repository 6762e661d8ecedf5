use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::timestamp::iso_date;
use crate::{UtcDateTime, ValidationError};

/// Structural check applied to every decoded payload before it is accepted.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Daily stock observation. OHLV fields are present when the backend sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPoint {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl StockPoint {
    pub fn close_only(date: Date, close: f64) -> Self {
        Self {
            date,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }
}

/// Stock price series with derived current price and change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSeries {
    pub symbol: String,
    pub data: Vec<StockPoint>,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl Validate for StockSeries {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.data.is_empty() {
            return Err(ValidationError::EmptySeries { field: "data" });
        }
        for point in &self.data {
            ensure_finite("close", point.close)?;
            ensure_optional_finite("open", point.open)?;
            ensure_optional_finite("high", point.high)?;
            ensure_optional_finite("low", point.low)?;
        }
        ensure_finite("currentPrice", self.current_price)?;
        ensure_finite("change", self.change)?;
        ensure_finite("changePercent", self.change_percent)
    }
}

/// Hourly crypto observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoPoint {
    pub timestamp: UtcDateTime,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoSeries {
    pub symbol: String,
    pub data: Vec<CryptoPoint>,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl Validate for CryptoSeries {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.data.is_empty() {
            return Err(ValidationError::EmptySeries { field: "data" });
        }
        for point in &self.data {
            ensure_finite("price", point.price)?;
            ensure_optional_finite("volume", point.volume)?;
            ensure_optional_finite("marketCap", point.market_cap)?;
        }
        ensure_finite("currentPrice", self.current_price)?;
        ensure_finite("change", self.change)?;
        ensure_finite("changePercent", self.change_percent)
    }
}

/// Daily exchange rate observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForexPoint {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForexSeries {
    pub pair: String,
    pub data: Vec<ForexPoint>,
    pub current_rate: f64,
}

impl Validate for ForexSeries {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.data.is_empty() {
            return Err(ValidationError::EmptySeries { field: "data" });
        }
        for point in &self.data {
            ensure_finite("rate", point.rate)?;
            ensure_optional_finite("bid", point.bid)?;
            ensure_optional_finite("ask", point.ask)?;
        }
        ensure_finite("currentRate", self.current_rate)
    }
}

/// One slice of the portfolio allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub asset: String,
    pub value: f64,
    pub percentage: f64,
}

/// Portfolio allocation; serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio(pub Vec<Allocation>);

impl Portfolio {
    pub fn allocations(&self) -> &[Allocation] {
        &self.0
    }

    pub fn total_value(&self) -> f64 {
        self.0.iter().map(|allocation| allocation.value).sum()
    }
}

impl Validate for Portfolio {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptySeries { field: "portfolio" });
        }
        for allocation in &self.0 {
            ensure_finite("value", allocation.value)?;
            ensure_finite("percentage", allocation.percentage)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub value: f64,
    pub change: f64,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicIndicators {
    pub gdp: Indicator,
    pub unemployment: Indicator,
    pub inflation: Indicator,
    pub interest_rate: Indicator,
}

impl EconomicIndicators {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Indicator)> {
        [
            ("gdp", &self.gdp),
            ("unemployment", &self.unemployment),
            ("inflation", &self.inflation),
            ("interestRate", &self.interest_rate),
        ]
        .into_iter()
    }
}

impl Validate for EconomicIndicators {
    fn validate(&self) -> Result<(), ValidationError> {
        for (_, indicator) in self.iter() {
            ensure_finite("value", indicator.value)?;
            ensure_finite("change", indicator.change)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexLevel {
    pub value: f64,
    pub change: f64,
}

/// Top gainer / loser row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub indices: BTreeMap<String, IndexLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_gainers: Vec<Mover>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_losers: Vec<Mover>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<UtcDateTime>,
}

impl Validate for MarketOverview {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.indices.is_empty() {
            return Err(ValidationError::EmptySeries { field: "indices" });
        }
        for level in self.indices.values() {
            ensure_finite("value", level.value)?;
            ensure_finite("change", level.change)?;
        }
        for mover in self.top_gainers.iter().chain(&self.top_losers) {
            ensure_finite("price", mover.price)?;
            ensure_finite("change", mover.change)?;
        }
        Ok(())
    }
}

/// Backend liveness probe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Instruments the backend knows how to serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableAssets {
    pub stocks: Vec<String>,
    pub crypto: Vec<String>,
    pub forex: Vec<String>,
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteValue { field })
    }
}

fn ensure_optional_finite(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |value| ensure_finite(field, value))
}
