//! # Domain Models
//!
//! Payload types for the six dashboard series, plus the validated symbol and
//! timestamp primitives they are built from.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockSeries`] | 30 daily closes with current price and change |
//! | [`CryptoSeries`] | 24 hourly prices with current price and change |
//! | [`ForexSeries`] | 30 daily rates with current rate |
//! | [`Portfolio`] | Asset allocation slices |
//! | [`EconomicIndicators`] | GDP, unemployment, inflation, interest rate |
//! | [`MarketOverview`] | Index levels and top movers |
//! | [`Symbol`] | Validated ticker |
//! | [`ForexPair`] | Validated currency pair |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! All wire formats are camelCase JSON. Every decoded payload goes through
//! [`Validate`] before the orchestrator accepts it.

mod models;
mod symbol;
pub mod timestamp;

pub use models::{
    Allocation, AvailableAssets, CryptoPoint, CryptoSeries, EconomicIndicators, ForexPoint,
    ForexSeries, HealthReport, IndexLevel, Indicator, MarketOverview, Mover, Portfolio,
    StockPoint, StockSeries, Validate,
};
pub use symbol::{ForexPair, Symbol};
pub use timestamp::UtcDateTime;
