use tracing::{info, warn};

use crate::core::config::Config;
use crate::server::error::{NotResumableReason, ResourceRouteError};
use crate::types::jobs::record::StoredRecord;
use crate::types::jobs::resource_id::ResourceId;
use crate::types::jobs::types::JobStatus;

/// Message written into a record the probe declared dead.
pub const LIVENESS_FLIP_MESSAGE: &str =
    "The process no longer seems to be running and has therefore been set to error.";

/// What the liveness probe observed about a record that claims `running`.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The latest record vanished between the two reads.
    Vanished,
    /// `time_delta` did not advance across the bounded wait; the worker is
    /// presumed dead. Carries the re-read record.
    Stalled(StoredRecord),
    /// `time_delta` advanced, the job is genuinely alive.
    Progressing,
}

/// Bounded-wait heuristic that tells a dead worker from a live one. There is
/// no lock over the record: a race between this probe and a worker writing
/// fresh progress is an accepted weak-consistency point.
pub struct LivenessProbe;

impl LivenessProbe {
    /// Waits the configured interval, re-reads the latest record and compares
    /// `time_delta`. The wait suspends the task, no thread is held.
    pub async fn observe(
        before: &StoredRecord,
        user_id: &str,
        resource_id: &ResourceId,
        config: &Config,
    ) -> Result<ProbeOutcome, ResourceRouteError> {
        tokio::time::sleep(config.resumption_params().liveness_probe_interval).await;

        let (_, reread) = config.database().get_latest(user_id, resource_id).await?;
        let Some(reread) = reread else {
            return Ok(ProbeOutcome::Vanished);
        };
        if before.record.time_delta == reread.record.time_delta {
            Ok(ProbeOutcome::Stalled(reread))
        } else {
            Ok(ProbeOutcome::Progressing)
        }
    }
}

/// Decides whether a resource may start a new iteration and computes the
/// resumption offset across prior attempts.
pub struct ResumptionPlanner;

impl ResumptionPlanner {
    /// Eligibility decision over the latest record's status. For a `running`
    /// record the liveness probe runs first; a record it declares dead is
    /// flipped to `error` and committed back under its own iteration as a
    /// recovery side effect, while the caller still gets the rejection.
    pub async fn check_new_iteration(
        stored: &StoredRecord,
        user_id: &str,
        resource_id: &ResourceId,
        config: &Config,
    ) -> Result<(), ResourceRouteError> {
        match stored.record.status {
            JobStatus::Accepted | JobStatus::Finished => {
                Err(ResourceRouteError::NotResumable(NotResumableReason::WrongStatus(stored.record.status)))
            }
            JobStatus::Running => {
                match LivenessProbe::observe(stored, user_id, resource_id, config).await? {
                    ProbeOutcome::Vanished => {
                        Err(ResourceRouteError::ResourceNotFound(resource_id.to_string()))
                    }
                    ProbeOutcome::Stalled(mut reread) => {
                        warn!(user_id, resource_id = %resource_id, "Running resource made no progress, flipping to error");
                        reread.record.status = JobStatus::Error;
                        reread.record.message = LIVENESS_FLIP_MESSAGE.to_string();
                        let iteration = reread.record.iteration.unwrap_or(1);
                        let flipped = StoredRecord::new(200, reread.record);
                        let committed = config.database().commit(user_id, resource_id, iteration, flipped).await?;
                        if committed {
                            Err(ResourceRouteError::NotResumable(NotResumableReason::StillRunning))
                        } else {
                            Err(ResourceRouteError::NotResumable(NotResumableReason::RecoveryCommitFailed))
                        }
                    }
                    ProbeOutcome::Progressing => {
                        Err(ResourceRouteError::NotResumable(NotResumableReason::StillRunning))
                    }
                }
            }
            JobStatus::Error | JobStatus::Terminated => Ok(()),
        }
    }

    /// Cumulative 0-based process chain position at which the continuation
    /// resumes: the latest record contributes `step - 1`, then every older
    /// iteration down to 1 adds its own `step - 1`.
    pub async fn cumulative_resume_step(
        latest: &StoredRecord,
        old_iteration: u32,
        user_id: &str,
        resource_id: &ResourceId,
        config: &Config,
    ) -> Result<u32, ResourceRouteError> {
        let mut pc_step = latest.record.progress.step.saturating_sub(1);
        for iteration in (1..old_iteration).rev() {
            let older = config
                .database()
                .get(user_id, resource_id, iteration)
                .await?
                .ok_or_else(|| ResourceRouteError::ResourceNotFound(resource_id.to_string()))?;
            pc_step += older.record.progress.step.saturating_sub(1);
        }
        info!(user_id, resource_id = %resource_id, pc_step, "Computed resumption offset");
        Ok(pc_step)
    }
}
