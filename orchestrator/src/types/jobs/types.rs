use serde::{Deserialize, Serialize};

/// Lifecycle state of one attempt (iteration) of a resource.
///
/// Within one iteration the status only moves forward: `Accepted` ->
/// `Running` -> one of {`Finished`, `Error`, `Terminated`}. `Terminated` is
/// reachable from `Accepted` and `Running` through an external termination
/// request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    /// The request was received and persisted, no worker picked it up yet
    Accepted,
    /// A worker is executing the process chain
    Running,
    /// The process chain ran to completion
    Finished,
    /// The process chain failed, or the liveness probe declared the worker dead
    Error,
    /// A termination request was honored by the worker
    Terminated,
}

impl JobStatus {
    /// Statuses a termination request makes sense for.
    pub fn is_terminable(&self) -> bool {
        matches!(self, JobStatus::Accepted | JobStatus::Running)
    }
}

/// Filter applied by the resource listing endpoint.
///
/// Anything that is not the literal `all` is compared case-insensitively
/// against the status wire form; an unknown value simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Status(String),
}

impl StatusFilter {
    pub fn new(raw: &str) -> Self {
        let lowered = raw.to_ascii_lowercase();
        if lowered == "all" {
            StatusFilter::All
        } else {
            StatusFilter::Status(lowered)
        }
    }

    pub fn matches(&self, status: JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(wanted) => *wanted == status.to_string(),
        }
    }
}
