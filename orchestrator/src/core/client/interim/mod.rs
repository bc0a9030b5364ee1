pub mod mongodb;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::jobs::resource_id::ResourceId;

#[derive(Error, Debug)]
pub enum InterimResultError {
    #[error("Interim result lookup failed: {0}")]
    Driver(#[from] ::mongodb::error::Error),
}

/// Checkpoint collaborator. A checkpoint is externally-maintained evidence
/// that processing state as of `(pc_step, iteration)` is durably available;
/// a continuation is only built when one exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterimResultStore: Send + Sync {
    async fn has_checkpoint(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
        pc_step: u32,
        iteration: u32,
    ) -> Result<bool, InterimResultError>;
}
