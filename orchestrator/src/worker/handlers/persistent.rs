use async_trait::async_trait;

use super::{build_descriptor, seed_accepted_record, ContinuationHandler, ContinuationRequest};
use crate::core::config::Config;
use crate::server::error::ResourceRouteError;
use crate::types::endpoint::EndpointKind;
use crate::types::jobs::descriptor::{JobDescriptor, StartRoutine};
use crate::types::jobs::record::StoredRecord;

/// Continuations of `/locations/{location}/mapsets/{mapset}/processing_async`
/// submissions. The continuation is bound to the same persistent mapset the
/// original attempt wrote into.
pub struct PersistentMapsetHandler;

#[async_trait]
impl ContinuationHandler for PersistentMapsetHandler {
    fn kind(&self) -> EndpointKind {
        EndpointKind::PersistentMapsetProcessing
    }

    fn start_routine(&self) -> StartRoutine {
        StartRoutine::PersistentMapsetProcessing
    }

    async fn preprocess(
        &self,
        request: ContinuationRequest<'_>,
        config: &Config,
    ) -> Result<(JobDescriptor, StoredRecord), ResourceRouteError> {
        let mapset = request
            .mapset
            .clone()
            .ok_or_else(|| ResourceRouteError::UnsupportedEndpoint(request.post_url.to_string()))?;
        let seeded = seed_accepted_record(&request, self.kind(), config).await?;
        let descriptor = build_descriptor(&request, self.kind(), Some(mapset), config);
        Ok((descriptor, seeded))
    }
}
