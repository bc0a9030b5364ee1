pub mod ephemeral;
pub mod export;
pub mod factory;
pub mod persistent;

use async_trait::async_trait;
use chrono::Utc;
use url::Url;

use crate::core::config::Config;
use crate::server::error::ResourceRouteError;
use crate::types::endpoint::EndpointKind;
use crate::types::jobs::descriptor::{JobDescriptor, StartRoutine};
use crate::types::jobs::record::{ApiInfo, JobRecord, Progress, StoredRecord};
use crate::types::jobs::resource_id::ResourceId;
use crate::types::jobs::types::JobStatus;

/// Everything a kind handler needs to build one continuation.
pub struct ContinuationRequest<'a> {
    pub user_id: &'a str,
    pub resource_id: &'a ResourceId,
    pub iteration: u32,
    pub post_url: &'a str,
    pub pc_step: u32,
    pub location: String,
    pub mapset: Option<String>,
}

/// Per-endpoint-kind construction of a continuation job. `preprocess` seeds
/// the new iteration's `accepted` record in the store and returns the
/// populated descriptor; the start routine names the engine entry point the
/// dispatcher routes to.
#[async_trait]
pub trait ContinuationHandler: Send + Sync {
    fn kind(&self) -> EndpointKind;

    fn start_routine(&self) -> StartRoutine;

    async fn preprocess(
        &self,
        request: ContinuationRequest<'_>,
        config: &Config,
    ) -> Result<(JobDescriptor, StoredRecord), ResourceRouteError>;
}

/// Seeds the new iteration's record: `accepted`, zero progress, api info
/// derived from the submission URL, replay code 200. Committed under the new
/// iteration so pollers see the continuation immediately.
pub(crate) async fn seed_accepted_record(
    request: &ContinuationRequest<'_>,
    kind: EndpointKind,
    config: &Config,
) -> Result<StoredRecord, ResourceRouteError> {
    let path = Url::parse(request.post_url)
        .map(|url| url.path().to_string())
        .map_err(|_| ResourceRouteError::UnsupportedEndpoint(request.post_url.to_string()))?;
    let now = Utc::now().timestamp_millis() as f64 / 1000.0;

    let record = JobRecord {
        status: JobStatus::Accepted,
        message: "Resource accepted".to_string(),
        resource_id: request.resource_id.to_string(),
        user_id: request.user_id.to_string(),
        iteration: Some(request.iteration),
        accept_timestamp: now,
        timestamp: now,
        time_delta: 0.0,
        progress: Progress { step: 0, num_of_steps: 0 },
        api_info: ApiInfo {
            endpoint: kind.to_string(),
            method: "POST".to_string(),
            path,
            request_url: request.post_url.to_string(),
            post_url: Some(request.post_url.to_string()),
        },
        process_chain_list: Vec::new(),
        process_log: Vec::new(),
    };

    let stored = StoredRecord::new(200, record);
    config.database().commit(request.user_id, request.resource_id, request.iteration, stored.clone()).await?;
    Ok(stored)
}

/// Descriptor shared by all kinds; only the workspace binding differs.
pub(crate) fn build_descriptor(
    request: &ContinuationRequest<'_>,
    kind: EndpointKind,
    mapset: Option<String>,
    config: &Config,
) -> JobDescriptor {
    JobDescriptor {
        resource_id: request.resource_id.clone(),
        iteration: request.iteration,
        user_id: request.user_id.to_string(),
        kind,
        location: request.location.clone(),
        mapset,
        post_url: request.post_url.to_string(),
        pc_step: request.pc_step,
        timeout_seconds: config.resumption_params().job_timeout_seconds,
    }
}
