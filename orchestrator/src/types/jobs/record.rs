use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::jobs::types::JobStatus;

/// Schema version written into every persisted record.
pub const RECORD_SCHEMA_VERSION: u32 = 1;

/// Process chain progress of one iteration. `step` is 1-based and
/// non-decreasing while the iteration runs; a freshly seeded record carries
/// step 0 until the worker reports the first step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub step: u32,
    pub num_of_steps: u32,
}

/// Request metadata captured when an iteration was submitted. `post_url` is
/// only present on records seeded by the resumption path and points at the
/// endpoint the original submission used.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    pub endpoint: String,
    pub method: String,
    pub path: String,
    pub request_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
}

/// One snapshot of one attempt of a job. Mutated in place by the running
/// worker; this service only ever seeds iteration-`k>1` records and flips a
/// dead `running` record to `error`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub status: JobStatus,
    pub message: String,
    pub resource_id: String,
    pub user_id: String,
    /// Absent on legacy records written before resumption existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<u32>,
    pub accept_timestamp: f64,
    pub timestamp: f64,
    /// Elapsed seconds at snapshot time; the liveness probe compares this
    /// across a bounded wait to tell a dead worker from a live one.
    pub time_delta: f64,
    pub progress: Progress,
    pub api_info: ApiInfo,
    /// Opaque pass-through payloads owned by the processing engine.
    #[serde(default)]
    pub process_chain_list: Vec<Value>,
    #[serde(default)]
    pub process_log: Vec<Value>,
}

/// The persisted `(http_code, record)` pair, versioned so that a schema
/// mismatch is a detectable store corruption instead of undefined behavior.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub version: u32,
    pub http_code: u16,
    pub record: JobRecord,
}

impl StoredRecord {
    pub fn new(http_code: u16, record: JobRecord) -> Self {
        StoredRecord { version: RECORD_SCHEMA_VERSION, http_code, record }
    }

    /// Rejects records written by an unknown schema version.
    pub fn ensure_supported(&self) -> Result<(), u32> {
        if self.version == RECORD_SCHEMA_VERSION {
            Ok(())
        } else {
            Err(self.version)
        }
    }

    /// Merged all-iterations view served for bare resource ids: the latest
    /// record is the base, with the process chain and log concatenated across
    /// iterations in ascending order.
    pub fn merge_iterations(iterations: Vec<(u32, StoredRecord)>) -> Option<StoredRecord> {
        let (_, latest) = iterations.last()?.clone();
        let mut chain = Vec::new();
        let mut log = Vec::new();
        for (_, stored) in &iterations {
            chain.extend(stored.record.process_chain_list.iter().cloned());
            log.extend(stored.record.process_log.iter().cloned());
        }
        let mut merged = latest;
        merged.record.process_chain_list = chain;
        merged.record.process_log = log;
        Some(merged)
    }
}
