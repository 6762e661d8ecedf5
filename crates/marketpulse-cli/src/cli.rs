//! CLI argument definitions for MarketPulse.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `snapshot` | Run one refresh cycle and print it |
//! | `watch` | Keep refreshing on the configured interval |
//! | `health` | Probe the backend health endpoint |
//! | `assets` | List instruments the backend serves |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | none | JSON configuration file |
//! | `--stock` | `AAPL` | Stock symbol |
//! | `--crypto` | `BTC` | Crypto symbol |
//! | `--forex` | `EUR/USD` | Currency pair |
//! | `--interval` | `30` | Refresh interval in seconds (10-300) |
//! | `--demo-data` | `false` | Ask the backend for demo data (`real=false`) |
//! | `--offline` | `false` | Skip the backend; generate every series locally |
//! | `--format` | `json` | Output format (json, table) |
//!
//! Flags override `MARKETPULSE_*` environment variables, which override the
//! config file.
//!
//! # Examples
//!
//! ```bash
//! marketpulse snapshot --stock MSFT --pretty
//! marketpulse watch --interval 10 --cycles 3 --format table
//! marketpulse snapshot --offline --seed 42
//! marketpulse health --api-base http://localhost:5000/api
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// MarketPulse - financial dashboard data refresher
///
/// Fetches stocks, crypto, forex, portfolio, economic indicators and market
/// overview from a dashboard backend, substituting mock data per series when
/// the backend cannot answer.
#[derive(Debug, Parser)]
#[command(
    name = "marketpulse",
    author,
    version,
    about = "Financial dashboard data refresher"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Configuration flags layered over the config file and environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// JSON configuration file (camelCase keys).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stock ticker, e.g. AAPL.
    #[arg(long, global = true)]
    pub stock: Option<String>,

    /// Crypto symbol, e.g. BTC.
    #[arg(long, global = true)]
    pub crypto: Option<String>,

    /// Currency pair, e.g. EUR/USD or EURUSD.
    #[arg(long, global = true)]
    pub forex: Option<String>,

    /// Refresh interval in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Request demo data from the backend (`real=false`).
    #[arg(long, global = true, default_value_t = false)]
    pub demo_data: bool,

    /// Do not contact the backend; every series is generated locally.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Backend base URL.
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Hide a series from output (repeatable): stocks, crypto, forex,
    /// portfolio, economic.
    #[arg(long, global = true, value_name = "KIND")]
    pub hide: Vec<String>,

    /// Dashboard theme recorded in the configuration.
    #[arg(long, global = true, value_name = "THEME")]
    pub theme: Option<String>,

    /// Seed for mock data; identical seeds reproduce fallback values.
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object per refresh result.
    Json,
    /// Human-readable summary.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one refresh cycle and print the result.
    Snapshot,

    /// Refresh on the configured interval until Ctrl-C.
    Watch(WatchArgs),

    /// Probe the backend health endpoint.
    Health,

    /// List the instruments the backend can serve.
    Assets,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Stop after this many refresh results.
    #[arg(long)]
    pub cycles: Option<u64>,
}
