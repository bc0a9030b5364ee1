use clap::{Parser, Subcommand};

pub mod database;
pub mod resumption;
pub mod server;

use database::DatabaseCliArgs;
use resumption::ResumptionCliArgs;
use server::ServerCliArgs;

#[derive(Parser, Debug)]
#[command(
    name = "geoflow-orchestrator",
    about = "GeoFlow Orchestrator - asynchronous geoprocessing job lifecycle and resumption management",
    long_about = "GeoFlow Orchestrator answers status requests for asynchronous geoprocessing jobs, \
    requests cooperative termination, and resumes failed jobs from their last completed step.\n\n\
    Quick Start:\n  \
    geoflow-orchestrator run --database-uri mongodb://localhost:27017"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the orchestrator service
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct RunCmd {
    #[command(flatten)]
    pub server_args: ServerCliArgs,

    #[command(flatten)]
    pub database_args: DatabaseCliArgs,

    #[command(flatten)]
    pub resumption_args: ResumptionCliArgs,
}
