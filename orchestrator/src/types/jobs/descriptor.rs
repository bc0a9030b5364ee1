use serde::{Deserialize, Serialize};

use crate::types::endpoint::EndpointKind;
use crate::types::jobs::resource_id::ResourceId;

/// Fully-populated description of a continuation job, bound to the processing
/// workspace of the original submission. Handed to the dispatcher together
/// with the kind-specific start routine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub resource_id: ResourceId,
    pub iteration: u32,
    pub user_id: String,
    pub kind: EndpointKind,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapset: Option<String>,
    pub post_url: String,
    /// 0-based position in the logical cross-iteration process chain at which
    /// the continuation resumes.
    pub pc_step: u32,
    pub timeout_seconds: u64,
}

/// Entry point tag of the processing engine for one endpoint kind. The engine
/// itself lives out of process; the dispatcher only routes by this tag.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StartRoutine {
    EphemeralProcessing,
    PersistentMapsetProcessing,
    EphemeralExport,
}
