use async_trait::async_trait;

use super::{build_descriptor, seed_accepted_record, ContinuationHandler, ContinuationRequest};
use crate::core::config::Config;
use crate::server::error::ResourceRouteError;
use crate::types::endpoint::EndpointKind;
use crate::types::jobs::descriptor::{JobDescriptor, StartRoutine};
use crate::types::jobs::record::StoredRecord;

/// Continuations of `/locations/{location}/processing_async` submissions.
/// Runs in a throwaway mapset, nothing persists beyond exported results.
pub struct EphemeralProcessingHandler;

#[async_trait]
impl ContinuationHandler for EphemeralProcessingHandler {
    fn kind(&self) -> EndpointKind {
        EndpointKind::EphemeralProcessing
    }

    fn start_routine(&self) -> StartRoutine {
        StartRoutine::EphemeralProcessing
    }

    async fn preprocess(
        &self,
        request: ContinuationRequest<'_>,
        config: &Config,
    ) -> Result<(JobDescriptor, StoredRecord), ResourceRouteError> {
        let seeded = seed_accepted_record(&request, self.kind(), config).await?;
        let descriptor = build_descriptor(&request, self.kind(), None, config);
        Ok((descriptor, seeded))
    }
}
