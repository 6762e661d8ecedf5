use marketpulse_core::{DashboardConfig, Orchestrator};
use tracing::info;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output;

pub async fn health(
    cli: &Cli,
    orchestrator: &Orchestrator,
    config: &DashboardConfig,
) -> Result<(), CliError> {
    let report = orchestrator.health(config).await?;
    info!(status = %report.status, healthy = report.is_healthy(), "backend health probed");
    output::render_value(&report, cli.format, cli.pretty)
}

pub async fn assets(
    cli: &Cli,
    orchestrator: &Orchestrator,
    config: &DashboardConfig,
) -> Result<(), CliError> {
    let assets = orchestrator.available_assets(config).await?;
    output::render_value(&assets, cli.format, cli.pretty)
}
