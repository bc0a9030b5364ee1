use std::time::Duration;

use crate::cli::database::DatabaseCliArgs;
use crate::cli::resumption::ResumptionCliArgs;
use crate::cli::server::ServerCliArgs;

#[derive(Debug, Clone)]
pub struct ServerParams {
    pub host: String,
    pub port: u16,
}

impl From<ServerCliArgs> for ServerParams {
    fn from(args: ServerCliArgs) -> Self {
        Self { host: args.host, port: args.port }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseParams {
    pub connection_uri: String,
    pub database_name: String,
}

impl From<DatabaseCliArgs> for DatabaseParams {
    fn from(args: DatabaseCliArgs) -> Self {
        Self { connection_uri: args.database_uri, database_name: args.database_name }
    }
}

/// Immutable per-process snapshot of the resumption settings. Handlers read
/// this snapshot instead of shared mutable configuration.
#[derive(Debug, Clone)]
pub struct ResumptionParams {
    /// Gate for the resume endpoint; continuations need interim results.
    pub interim_results_enabled: bool,
    /// Bounded wait of the liveness probe before the latest record is re-read.
    pub liveness_probe_interval: Duration,
    /// Per-job timeout handed to the dispatcher with each continuation.
    pub job_timeout_seconds: u64,
}

impl From<ResumptionCliArgs> for ResumptionParams {
    fn from(args: ResumptionCliArgs) -> Self {
        Self {
            interim_results_enabled: args.interim_results_enabled,
            liveness_probe_interval: Duration::from_secs(args.liveness_probe_interval_seconds),
            job_timeout_seconds: args.job_timeout_seconds,
        }
    }
}
