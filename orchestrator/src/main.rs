use std::sync::Arc;

use clap::Parser as _;
use dotenvy::dotenv;
use geoflow_orchestrator::cli::{Cli, Commands, RunCmd};
use geoflow_orchestrator::core::config::Config;
use geoflow_orchestrator::server::setup_server;
use geoflow_orchestrator::utils::logging::init_logging;
use geoflow_orchestrator::{OrchestratorError, OrchestratorResult};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting orchestrator");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => match run_orchestrator(run_command).await {
            Ok(_) => {
                info!("Orchestrator service stopped");
            }
            Err(e) => {
                error!(
                    error = %e,
                    error_chain = ?e,
                    "Failed to run orchestrator service"
                );
                panic!("Failed to run orchestrator service: {}", e);
            }
        },
    }
}

async fn run_orchestrator(run_cmd: &RunCmd) -> OrchestratorResult<()> {
    let (config, mut engine_feed) = Config::from_run_cmd(run_cmd).await?;
    let config = Arc::new(config);

    let (addr, server_handle) = setup_server(config.clone()).await?;
    info!(%addr, "Resource management API listening");

    // The processing engine consumes dispatched continuations out of process;
    // this drain is the in-process end of that seam.
    let engine_handle = tokio::spawn(async move {
        while let Some(job) = engine_feed.recv().await {
            debug!(
                resource_id = %job.descriptor.resource_id,
                iteration = job.descriptor.iteration,
                routine = %job.routine,
                "Continuation handed to processing engine"
            );
        }
    });

    tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl+c");

    server_handle.shutdown().await.map_err(|e| OrchestratorError::Server(e.to_string()))?;
    engine_handle.abort();
    Ok(())
}
