use clap::Args;

/// Parameters used to config job resumption.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct ResumptionCliArgs {
    /// Whether workers save interim results; job resumption needs them.
    #[arg(env = "GEOFLOW_ORCHESTRATOR_INTERIM_RESULTS_ENABLED", long, default_value_t = false)]
    pub interim_results_enabled: bool,

    /// Seconds the liveness probe waits before re-reading a running record.
    #[arg(env = "GEOFLOW_ORCHESTRATOR_LIVENESS_PROBE_INTERVAL", long, default_value = "5")]
    pub liveness_probe_interval_seconds: u64,

    /// Per-job timeout handed to the dispatcher with each continuation.
    #[arg(env = "GEOFLOW_ORCHESTRATOR_JOB_TIMEOUT", long, default_value = "600")]
    pub job_timeout_seconds: u64,
}
