use std::io::{self, Write};

use marketpulse_core::{DashboardConfig, RefreshResult, SeriesKind, SeriesOrigin};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Prints one refresh result. Hidden series are left out of both formats.
pub fn render_result(
    result: &RefreshResult,
    config: &DashboardConfig,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(&visible_json(result, config)?, pretty),
        OutputFormat::Table => {
            let mut stdout = io::stdout().lock();
            write_table(&mut stdout, result, config)?;
            Ok(())
        }
    }
}

/// Prints a probe answer; the table format falls back to indented JSON.
pub fn render_value<T: Serialize>(
    value: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let value = serde_json::to_value(value)?;
    match format {
        OutputFormat::Json => print_json(&value, pretty),
        OutputFormat::Table => {
            for line in serde_json::to_string_pretty(&value)?.lines() {
                println!("  {line}");
            }
            Ok(())
        }
    }
}

fn print_json(value: &Value, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{payload}");
    Ok(())
}

fn visible_json(result: &RefreshResult, config: &DashboardConfig) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(result)?;
    if let Value::Object(fields) = &mut value {
        for kind in SeriesKind::ALL {
            if !config.is_visible(kind) {
                fields.remove(&json_field(kind));
            }
        }
    }
    Ok(value)
}

fn json_field(kind: SeriesKind) -> String {
    match kind {
        SeriesKind::MarketOverview => String::from("marketOverview"),
        other => other.as_str().to_owned(),
    }
}

fn write_table(
    out: &mut impl Write,
    result: &RefreshResult,
    config: &DashboardConfig,
) -> Result<(), CliError> {
    writeln!(out, "cycle       : {}", result.cycle)?;
    writeln!(out, "updated_at  : {}", result.completed_at)?;
    writeln!(out, "theme       : {}", config.theme)?;

    for kind in SeriesKind::ALL {
        if !config.is_visible(kind) {
            continue;
        }
        let origin = result.origin(kind);
        writeln!(out, "{:<12}: {:<8} {}", kind.as_str(), origin.label(), summary(result, kind))?;
    }

    let fallbacks = result
        .fallback_kinds()
        .into_iter()
        .filter(|kind| config.is_visible(*kind))
        .collect::<Vec<_>>();
    if !fallbacks.is_empty() {
        writeln!(out, "fallbacks:")?;
        for kind in fallbacks {
            if let SeriesOrigin::Fallback { reason } = result.origin(kind) {
                writeln!(out, "  - {kind}: {reason}")?;
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

fn summary(result: &RefreshResult, kind: SeriesKind) -> String {
    match kind {
        SeriesKind::Stocks => {
            let stocks = &result.stocks.data;
            format!(
                "{} {:.2} ({:+.2}, {:+.2}%) {} pts",
                stocks.symbol,
                stocks.current_price,
                stocks.change,
                stocks.change_percent,
                stocks.data.len()
            )
        }
        SeriesKind::Crypto => {
            let crypto = &result.crypto.data;
            format!(
                "{} {:.2} ({:+.2}%) {} pts",
                crypto.symbol,
                crypto.current_price,
                crypto.change_percent,
                crypto.data.len()
            )
        }
        SeriesKind::Forex => {
            let forex = &result.forex.data;
            format!("{} {:.4} {} pts", forex.pair, forex.current_rate, forex.data.len())
        }
        SeriesKind::Portfolio => {
            let portfolio = &result.portfolio.data;
            format!(
                "{:.2} across {} assets",
                portfolio.total_value(),
                portfolio.allocations().len()
            )
        }
        SeriesKind::Economic => result
            .economic
            .data
            .iter()
            .map(|(name, indicator)| format!("{name}={}", indicator.value))
            .collect::<Vec<_>>()
            .join(" "),
        SeriesKind::MarketOverview => result
            .market_overview
            .data
            .indices
            .iter()
            .map(|(name, level)| format!("{name}={:.2} ({:+.2}%)", level.value, level.change))
            .collect::<Vec<_>>()
            .join(" "),
    }
}
