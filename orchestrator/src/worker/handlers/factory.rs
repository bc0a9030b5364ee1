use super::ephemeral::EphemeralProcessingHandler;
use super::export::EphemeralExportHandler;
use super::persistent::PersistentMapsetHandler;
use super::ContinuationHandler;
use crate::types::endpoint::EndpointKind;

/// Resolves the continuation handler for an endpoint kind. The kind set is
/// closed, every kind has exactly one handler.
pub fn get_continuation_handler(kind: &EndpointKind) -> Box<dyn ContinuationHandler> {
    match kind {
        EndpointKind::EphemeralProcessing => Box::new(EphemeralProcessingHandler),
        EndpointKind::PersistentMapsetProcessing => Box::new(PersistentMapsetHandler),
        EndpointKind::EphemeralExport => Box::new(EphemeralExportHandler),
    }
}
