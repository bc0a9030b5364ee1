use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::types::jobs::descriptor::{JobDescriptor, StartRoutine};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Processing engine queue is closed")]
    EngineUnavailable,
}

/// One continuation handed to the processing engine: the descriptor, the
/// kind-specific start routine and the per-job timeout the engine enforces.
#[derive(Debug, Clone)]
pub struct DispatchedJob {
    pub descriptor: JobDescriptor,
    pub routine: StartRoutine,
    pub timeout: Duration,
}

/// Fire-and-forget job dispatch. The façade never awaits job completion,
/// only the hand-off; execution, the worker pool and the timeout enforcement
/// belong to the engine side of this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    async fn dispatch(&self, job: DispatchedJob) -> Result<(), DispatchError>;
}

/// In-process queue head of the dispatcher seam. The engine adapter drains
/// the receiving end out of band.
pub struct QueueDispatcher {
    sender: UnboundedSender<DispatchedJob>,
}

impl QueueDispatcher {
    pub fn new() -> (Self, UnboundedReceiver<DispatchedJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl JobDispatcher for QueueDispatcher {
    async fn dispatch(&self, job: DispatchedJob) -> Result<(), DispatchError> {
        debug!(
            resource_id = %job.descriptor.resource_id,
            iteration = job.descriptor.iteration,
            routine = %job.routine,
            timeout_seconds = job.timeout.as_secs(),
            "Dispatching continuation job"
        );
        self.sender.send(job).map_err(|_| DispatchError::EngineUnavailable)
    }
}
