use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{info, instrument};

use crate::core::client::dispatcher::DispatchedJob;
use crate::core::config::Config;
use crate::server::error::{NotResumableReason, ResourceRouteError};
use crate::server::middleware::CallerIdentity;
use crate::server::service::access::AccessGate;
use crate::server::service::continuation::ContinuationBuilder;
use crate::server::service::resumption::ResumptionPlanner;
use crate::server::types::{ListQuery, ResourceListResponse, ResourceRouteResult, SimpleResponse};
use crate::types::jobs::record::{JobRecord, StoredRecord};
use crate::types::jobs::resource_id::{ResourceId, ResourceIdForm};
use crate::types::jobs::types::StatusFilter;

fn replay_code(stored: &StoredRecord) -> StatusCode {
    StatusCode::from_u16(stored.http_code).unwrap_or(StatusCode::OK)
}

/// Status of a resource. A canonical id addresses the latest iteration; a
/// bare id addresses the merged all-iterations view. The stored http code is
/// replayed to the poller.
#[instrument(skip(config, caller), fields(user_id = %user_id, resource_id = %resource_id))]
pub(crate) async fn handle_resource_status(
    State(config): State<Arc<Config>>,
    caller: CallerIdentity,
    Path((user_id, resource_id)): Path<(String, String)>,
) -> ResourceRouteResult {
    AccessGate::check(&caller.0, &user_id, config.user_directory()).await?;

    let (id, form) = ResourceId::normalize(&resource_id);
    let stored = match form {
        ResourceIdForm::Canonical => config.database().get_latest(&user_id, &id).await?.1,
        ResourceIdForm::Bare => {
            StoredRecord::merge_iterations(config.database().get_all_iterations(&user_id, &id).await?)
        }
    };
    let stored = stored.ok_or_else(|| ResourceRouteError::ResourceNotFound(id.to_string()))?;
    Ok((replay_code(&stored), Json(stored.record)).into_response())
}

/// Resumes a dead resource from its last completed step. Eligibility runs
/// the liveness probe against a record that claims `running`; an eligible
/// resource gets a new iteration seeded and its continuation dispatched
/// fire-and-forget. The response carries the freshly seeded record, not the
/// old one.
#[instrument(skip(config, caller), fields(user_id = %user_id, resource_id = %resource_id))]
pub(crate) async fn handle_resource_resume(
    State(config): State<Arc<Config>>,
    caller: CallerIdentity,
    Path((user_id, resource_id)): Path<(String, String)>,
) -> ResourceRouteResult {
    if !config.resumption_params().interim_results_enabled {
        return Err(ResourceRouteError::NotResumable(NotResumableReason::InterimResultsDisabled));
    }

    AccessGate::check(&caller.0, &user_id, config.user_directory()).await?;

    let (id, _) = ResourceId::normalize(&resource_id);
    let (pointer, stored) = config.database().get_latest(&user_id, &id).await?;
    // A record written before iteration tracking has no pointer; treat it as
    // the first attempt.
    let old_iteration = pointer.unwrap_or(1);
    let stored = stored.ok_or_else(|| ResourceRouteError::ResourceNotFound(id.to_string()))?;

    ResumptionPlanner::check_new_iteration(&stored, &user_id, &id, &config).await?;
    let pc_step = ResumptionPlanner::cumulative_resume_step(&stored, old_iteration, &user_id, &id, &config).await?;

    let iteration = old_iteration + 1;
    let post_url = if old_iteration == 1 {
        stored.record.api_info.request_url.clone()
    } else {
        stored
            .record
            .api_info
            .post_url
            .clone()
            .ok_or_else(|| ResourceRouteError::UnsupportedEndpoint(id.to_string()))?
    };

    let (descriptor, routine, seeded) =
        ContinuationBuilder::build(&post_url, pc_step, &user_id, &id, iteration, &config).await?;

    let timeout = Duration::from_secs(descriptor.timeout_seconds);
    config.dispatcher().dispatch(DispatchedJob { descriptor, routine, timeout }).await?;
    info!(user_id = %user_id, resource_id = %id, iteration, pc_step, "Continuation dispatched");

    Ok((replay_code(&seeded), Json(seeded.record)).into_response())
}

/// Requests cooperative termination of the latest iteration. The flag is
/// advisory: committing it is acknowledged with 200 regardless of whether the
/// worker ever honors it.
#[instrument(skip(config, caller), fields(user_id = %user_id, resource_id = %resource_id))]
pub(crate) async fn handle_resource_termination(
    State(config): State<Arc<Config>>,
    caller: CallerIdentity,
    Path((user_id, resource_id)): Path<(String, String)>,
) -> ResourceRouteResult {
    AccessGate::check(&caller.0, &user_id, config.user_directory()).await?;

    let (id, _) = ResourceId::normalize(&resource_id);
    let (pointer, stored) = config.database().get_latest(&user_id, &id).await?;
    if stored.is_none() {
        return Err(ResourceRouteError::ResourceNotFound(id.to_string()));
    }

    config.database().commit_termination(&user_id, &id, pointer).await?;
    info!(user_id = %user_id, resource_id = %id, "Termination request committed");

    Ok((StatusCode::OK, Json(SimpleResponse::accepted("Termination request committed"))).into_response())
}

/// Lists the user's resources, filtered by status and capped by `num`.
/// Entries keep the store-native order.
#[instrument(skip(config, caller, query), fields(user_id = %user_id))]
pub(crate) async fn handle_resource_list(
    State(config): State<Arc<Config>>,
    caller: CallerIdentity,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ResourceRouteResult {
    AccessGate::check(&caller.0, &user_id, config.user_directory()).await?;

    let filter = StatusFilter::new(query.type_.as_deref().unwrap_or("all"));
    let mut resource_list: Vec<JobRecord> = config
        .database()
        .list_resources(&user_id)
        .await?
        .into_iter()
        .filter(|record| filter.matches(record.status))
        .collect();
    if let Some(num) = query.num {
        resource_list.truncate(num);
    }

    Ok((StatusCode::OK, Json(ResourceListResponse { resource_list })).into_response())
}

/// Requests termination of every accepted or running resource of the user
/// and reports how many requests were issued.
#[instrument(skip(config, caller), fields(user_id = %user_id))]
pub(crate) async fn handle_bulk_termination(
    State(config): State<Arc<Config>>,
    caller: CallerIdentity,
    Path(user_id): Path<String>,
) -> ResourceRouteResult {
    AccessGate::check(&caller.0, &user_id, config.user_directory()).await?;

    let mut termination_requests = 0usize;
    for record in config.database().list_resources(&user_id).await? {
        if record.status.is_terminable() {
            let (id, _) = ResourceId::normalize(&record.resource_id);
            config.database().commit_termination(&user_id, &id, None).await?;
            termination_requests += 1;
        }
    }
    info!(user_id = %user_id, termination_requests, "Bulk termination committed");

    let message = format!("Successfully sent {termination_requests} termination requests");
    Ok((StatusCode::OK, Json(SimpleResponse::finished(message))).into_response())
}

/// Status of one specific iteration, keyed by its string form in the body.
#[instrument(skip(config, caller), fields(user_id = %user_id, resource_id = %resource_id, iteration))]
pub(crate) async fn handle_iteration_status(
    State(config): State<Arc<Config>>,
    caller: CallerIdentity,
    Path((user_id, resource_id, iteration)): Path<(String, String, u32)>,
) -> ResourceRouteResult {
    AccessGate::check(&caller.0, &user_id, config.user_directory()).await?;

    let (id, _) = ResourceId::normalize(&resource_id);
    let stored = config
        .database()
        .get(&user_id, &id, iteration)
        .await?
        .ok_or_else(|| ResourceRouteError::ResourceNotFound(id.to_string()))?;

    let mut body = BTreeMap::new();
    body.insert(iteration.to_string(), stored.record);
    Ok((StatusCode::OK, Json(body)).into_response())
}
