use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::core::config::Config;
use crate::server::types::SimpleResponse;

pub(super) mod resources;

use resources::{
    handle_bulk_termination, handle_iteration_status, handle_resource_list, handle_resource_resume,
    handle_resource_status, handle_resource_termination,
};

/// Fallback for routes nothing else matched; keeps the error envelope
/// consistent with everything else the API returns.
pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(SimpleResponse::error("The requested resource was not found")))
}

async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, Json(SimpleResponse::new("success", "Server is running")))
}

fn resource_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/", get(handle_resource_list).delete(handle_bulk_termination))
        .route(
            "/:resource_id",
            get(handle_resource_status).put(handle_resource_resume).delete(handle_resource_termination),
        )
        .route("/:resource_id/iterations/:iteration", get(handle_iteration_status))
        .with_state(config)
}

pub(crate) fn server_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .nest("/users/:user_id/resources", resource_router(config))
        .fallback(handler_404)
}
