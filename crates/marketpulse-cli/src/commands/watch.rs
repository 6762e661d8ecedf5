use std::sync::Arc;

use marketpulse_core::{scheduler, DashboardConfig, Orchestrator, SnapshotStore};
use tracing::info;

use crate::cli::{Cli, WatchArgs};
use crate::error::CliError;
use crate::output;

/// Prints every refresh result until Ctrl-C or `--cycles` results.
pub async fn run(
    cli: &Cli,
    args: &WatchArgs,
    orchestrator: Arc<Orchestrator>,
    config: DashboardConfig,
) -> Result<(), CliError> {
    let store = SnapshotStore::new();
    let mut updates = store.subscribe();
    let handle = scheduler::start(orchestrator, config.clone(), store.sink());
    info!(
        interval_secs = config.refresh_interval.as_secs(),
        cycles = args.cycles,
        "watching dashboard data"
    );

    let mut printed = 0_u64;
    let outcome = loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                info!("interrupted; stopping refresh loop");
                break signal.map_err(CliError::from);
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let latest = updates.borrow_and_update().clone();
                let Some(result) = latest else {
                    continue;
                };
                if let Err(error) = output::render_result(&result, &config, cli.format, cli.pretty) {
                    break Err(error);
                }
                printed += 1;
                if args.cycles.is_some_and(|limit| printed >= limit) {
                    break Ok(());
                }
            }
        }
    };

    handle.cancel().await?;
    outcome
}
