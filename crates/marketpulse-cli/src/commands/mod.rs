mod probe;
mod snapshot;
mod watch;

use std::sync::Arc;

use marketpulse_core::{Orchestrator, ReqwestHttpClient};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::settings;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = settings::resolve(&cli.overrides)?;
    let orchestrator = Arc::new(build_orchestrator(cli.overrides.seed));

    match &cli.command {
        Command::Snapshot => snapshot::run(cli, &orchestrator, &config).await,
        Command::Watch(args) => watch::run(cli, args, orchestrator, config).await,
        Command::Health => probe::health(cli, &orchestrator, &config).await,
        Command::Assets => probe::assets(cli, &orchestrator, &config).await,
    }
}

fn build_orchestrator(seed: Option<u64>) -> Orchestrator {
    let http_client = Arc::new(ReqwestHttpClient::new());
    match seed {
        Some(seed) => Orchestrator::with_seed(http_client, seed),
        None => Orchestrator::new(http_client),
    }
}
