use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of the canonical resource id form.
pub const RESOURCE_ID_PREFIX: &str = "resource_id-";

/// Which form the caller used when addressing a resource.
///
/// The status endpoint keeps a deliberate asymmetry between the two forms, so
/// normalization has to report what it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceIdForm {
    Canonical,
    Bare,
}

/// Canonical resource identifier (`resource_id-<uuid>`), stable across all
/// iterations of a job.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Accepts either the canonical or the bare form and returns the
    /// canonical id together with the form the caller used.
    pub fn normalize(raw: &str) -> (Self, ResourceIdForm) {
        if raw.starts_with(RESOURCE_ID_PREFIX) {
            (ResourceId(raw.to_string()), ResourceIdForm::Canonical)
        } else {
            (ResourceId(format!("{RESOURCE_ID_PREFIX}{raw}")), ResourceIdForm::Bare)
        }
    }

    pub fn generate() -> Self {
        ResourceId(format!("{RESOURCE_ID_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
