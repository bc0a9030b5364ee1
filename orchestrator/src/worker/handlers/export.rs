use async_trait::async_trait;

use super::{build_descriptor, seed_accepted_record, ContinuationHandler, ContinuationRequest};
use crate::core::config::Config;
use crate::server::error::ResourceRouteError;
use crate::types::endpoint::EndpointKind;
use crate::types::jobs::descriptor::{JobDescriptor, StartRoutine};
use crate::types::jobs::record::StoredRecord;

/// Continuations of `/locations/{location}/processing_async_export`
/// submissions: ephemeral processing whose results are exported afterwards.
pub struct EphemeralExportHandler;

#[async_trait]
impl ContinuationHandler for EphemeralExportHandler {
    fn kind(&self) -> EndpointKind {
        EndpointKind::EphemeralExport
    }

    fn start_routine(&self) -> StartRoutine {
        StartRoutine::EphemeralExport
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
