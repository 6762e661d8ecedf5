//! # MarketPulse Core
//!
//! Data refresh orchestration for the MarketPulse financial dashboard.
//!
//! ## Overview
//!
//! This crate keeps a dashboard's six data series current:
//!
//! - **Concurrent fetches** of stocks, crypto, forex, portfolio, economic
//!   indicators and market overview from a JSON backend
//! - **Per-series fallback** to deterministic-structure mock data when a fetch
//!   fails, so every refresh result is fully populated
//! - **Periodic scheduling** with cancellation and restart on configuration
//!   change
//! - **Snapshot store** holding the latest result for readers
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Dashboard configuration and refresh key |
//! | [`domain`] | Series payloads, symbols, timestamps |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`mock`] | Synthetic fallback series |
//! | [`orchestrator`] | One refresh cycle and backend probes |
//! | [`scheduler`] | Polling loop and its handle |
//! | [`snapshot`] | Refresh result and per-slot origin |
//! | [`store`] | Latest-result holder |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use marketpulse_core::{scheduler, DashboardConfig, Orchestrator, SnapshotStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SnapshotStore::new();
//!     let handle = scheduler::start(
//!         Arc::new(Orchestrator::default()),
//!         DashboardConfig::default(),
//!         store.sink(),
//!     );
//!
//!     let mut updates = store.subscribe();
//!     updates.changed().await?;
//!     if let Some(result) = store.latest() {
//!         println!("AAPL: {:.2}", result.stocks.data.current_price);
//!     }
//!
//!     handle.cancel().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │  RefreshHandle  │────▶│  Refresh loop    │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │
//!                                  ▼
//!                         ┌──────────────────┐     ┌──────────────┐
//!                         │  Orchestrator    │────▶│ HTTP Client  │
//!                         └────────┬─────────┘     └──────────────┘
//!                                  │ on failure
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │  Mock generator  │
//!                         └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! A refresh cycle never fails. Each series that cannot be fetched or decoded
//! is replaced by mock data, and its [`SeriesOrigin`] records the reason:
//!
//! ```rust
//! use marketpulse_core::{RefreshResult, SeriesKind, SeriesOrigin};
//!
//! fn report(result: &RefreshResult) {
//!     for kind in SeriesKind::ALL {
//!         if let SeriesOrigin::Fallback { reason } = result.origin(kind) {
//!             eprintln!("{kind}: {reason}");
//!         }
//!     }
//! }
//! ```
//!
//! Configuration loading, backend probes and scheduler handles return
//! [`ConfigError`], [`FetchError`] and [`SchedulerError`] respectively.

pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod mock;
pub mod orchestrator;
pub mod scheduler;
pub mod snapshot;
pub mod store;

// Configuration
pub use config::{DashboardConfig, RefreshInterval, RefreshKey, Theme, DEFAULT_API_BASE};

// Domain models
pub use domain::{
    Allocation, AvailableAssets, CryptoPoint, CryptoSeries, EconomicIndicators, ForexPair,
    ForexPoint, ForexSeries, HealthReport, IndexLevel, Indicator, MarketOverview, Mover,
    Portfolio, StockPoint, StockSeries, Symbol, UtcDateTime, Validate,
};

// Error types
pub use error::{ConfigError, FetchError, SchedulerError, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Refresh
pub use orchestrator::{series_request, Orchestrator};
pub use scheduler::{start, RefreshHandle};
pub use snapshot::{RefreshResult, Series, SeriesKind, SeriesOrigin};
pub use store::SnapshotStore;
