//! Builds the effective [`DashboardConfig`]: config file, then
//! `MARKETPULSE_*` environment variables, then command-line flags.

use std::env;

use marketpulse_core::{DashboardConfig, ForexPair, RefreshInterval, SeriesKind, Symbol, Theme};
use tracing::warn;

use crate::cli::ConfigOverrides;
use crate::error::CliError;

pub const API_BASE_VAR: &str = "MARKETPULSE_API_BASE";
pub const REFRESH_INTERVAL_VAR: &str = "MARKETPULSE_REFRESH_INTERVAL";

pub fn resolve(overrides: &ConfigOverrides) -> Result<DashboardConfig, CliError> {
    resolve_with_env(overrides, |name| env::var(name).ok())
}

fn resolve_with_env(
    overrides: &ConfigOverrides,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<DashboardConfig, CliError> {
    let mut config = match &overrides.config {
        Some(path) => DashboardConfig::from_path(path)?,
        None => DashboardConfig::default(),
    };

    if let Some(api_base) = lookup(API_BASE_VAR) {
        config.api_base = api_base;
    }
    if let Some(raw) = lookup(REFRESH_INTERVAL_VAR) {
        let secs = raw.trim().parse::<u64>().map_err(|error| CliError::Environment {
            name: REFRESH_INTERVAL_VAR,
            message: error.to_string(),
        })?;
        config.refresh_interval = bounded_interval(secs);
    }

    apply_flags(&mut config, overrides)?;
    config.validate()?;
    Ok(config)
}

fn apply_flags(config: &mut DashboardConfig, overrides: &ConfigOverrides) -> Result<(), CliError> {
    if let Some(stock) = &overrides.stock {
        config.stock_symbol = Symbol::parse(stock)?;
    }
    if let Some(crypto) = &overrides.crypto {
        config.crypto_symbol = Symbol::parse(crypto)?;
    }
    if let Some(forex) = &overrides.forex {
        config.forex_pair = ForexPair::parse(forex)?;
    }
    if let Some(secs) = overrides.interval {
        config.refresh_interval = bounded_interval(secs);
    }
    if overrides.demo_data {
        config.use_real_data = false;
    }
    if overrides.offline {
        config.offline = true;
    }
    if let Some(api_base) = &overrides.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(timeout_ms) = overrides.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }
    if let Some(theme) = &overrides.theme {
        config.theme = theme.parse::<Theme>()?;
    }
    for raw in &overrides.hide {
        config.set_visible(raw.parse::<SeriesKind>()?, false);
    }
    Ok(())
}

fn bounded_interval(secs: u64) -> RefreshInterval {
    let interval = RefreshInterval::clamped(secs);
    if interval.as_secs() != secs {
        warn!(
            requested = secs,
            applied = interval.as_secs(),
            "refresh interval clamped to [10, 300] seconds"
        );
    }
    interval
}
