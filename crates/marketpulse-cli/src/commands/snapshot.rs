use marketpulse_core::{DashboardConfig, Orchestrator};
use tracing::warn;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output;

pub async fn run(
    cli: &Cli,
    orchestrator: &Orchestrator,
    config: &DashboardConfig,
) -> Result<(), CliError> {
    let result = orchestrator.refresh(config).await;

    let fallbacks = result.fallback_kinds();
    if !fallbacks.is_empty() {
        warn!(
            count = fallbacks.len(),
            api_base = %config.api_base,
            "snapshot contains mock fallback data"
        );
    }

    output::render_result(&result, config, cli.format, cli.pretty)
}
