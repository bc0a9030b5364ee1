use tracing::debug;

use crate::core::config::Config;
use crate::server::error::{NotResumableReason, ResourceRouteError};
use crate::types::endpoint::EndpointTarget;
use crate::types::jobs::descriptor::{JobDescriptor, StartRoutine};
use crate::types::jobs::record::StoredRecord;
use crate::types::jobs::resource_id::ResourceId;
use crate::worker::handlers::{factory, ContinuationRequest};

/// Builds the continuation of a resumable resource: re-validates that a
/// checkpoint exists, classifies the original endpoint, and lets the matching
/// kind handler seed the new iteration's record and populate the descriptor.
pub struct ContinuationBuilder;

impl ContinuationBuilder {
    pub async fn build(
        post_url: &str,
        pc_step: u32,
        user_id: &str,
        resource_id: &ResourceId,
        iteration: u32,
        config: &Config,
    ) -> Result<(JobDescriptor, StartRoutine, StoredRecord), ResourceRouteError> {
        let checkpoint_iteration = iteration.saturating_sub(1);
        let present =
            config.interim_results().has_checkpoint(user_id, resource_id, pc_step, checkpoint_iteration).await?;
        if !present {
            return Err(ResourceRouteError::NotResumable(NotResumableReason::CheckpointMissing));
        }

        let target = EndpointTarget::classify(post_url)
            .ok_or_else(|| ResourceRouteError::UnsupportedEndpoint(post_url.to_string()))?;
        debug!(user_id, resource_id = %resource_id, kind = %target.kind, "Classified continuation endpoint");

        let handler = factory::get_continuation_handler(&target.kind);
        let request = ContinuationRequest {
            user_id,
            resource_id,
            iteration,
            post_url,
            pc_step,
            location: target.location,
            mapset: target.mapset,
        };
        let (descriptor, seeded) = handler.preprocess(request, config).await?;
        Ok((descriptor, handler.start_routine(), seeded))
    }
}
