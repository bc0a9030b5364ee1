use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::core::client::database::DatabaseError;
use crate::core::client::dispatcher::DispatchError;
use crate::core::client::interim::InterimResultError;
use crate::core::client::users::UserDirectoryError;
use crate::server::types::SimpleResponse;
use crate::types::jobs::types::JobStatus;

/// Why an access check rejected the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionReason {
    WrongUser,
    WrongRole,
    WrongGroup,
}

impl fmt::Display for PermissionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionReason::WrongUser => f.write_str("Wrong user."),
            PermissionReason::WrongRole => f.write_str("Wrong user role."),
            PermissionReason::WrongGroup => f.write_str("Wrong user group."),
        }
    }
}

/// Why a resource cannot start a new iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotResumableReason {
    WrongStatus(JobStatus),
    StillRunning,
    RecoveryCommitFailed,
    InterimResultsDisabled,
    CheckpointMissing,
}

impl fmt::Display for NotResumableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotResumableReason::WrongStatus(status) => {
                write!(f, "Resource is {status}, resume not possible")
            }
            NotResumableReason::StillRunning => f.write_str("Resource is running, no restart possible"),
            NotResumableReason::RecoveryCommitFailed => {
                f.write_str("Resource is running and can not be set to error")
            }
            NotResumableReason::InterimResultsDisabled => {
                f.write_str("Interim results are not enabled in the configuration")
            }
            NotResumableReason::CheckpointMissing => f.write_str("No interim results found to resume from"),
        }
    }
}

/// Every failure a resource route can produce. `IntoResponse` maps each
/// variant to the structured `{"status":"error","message":...}` body, so no
/// fault crosses the façade boundary unhandled.
#[derive(Error, Debug)]
pub enum ResourceRouteError {
    #[error("You do not have the permission to access this resource. {0}")]
    PermissionDenied(PermissionReason),

    #[error("No authenticated caller identity was provided")]
    UnknownCaller,

    #[error("The user <{0}> does not exist")]
    UserNotFound(String),

    #[error("Resource does not exist")]
    ResourceNotFound(String),

    #[error("{0}")]
    NotResumable(NotResumableReason),

    #[error("Processing endpoint {0} does not support resumption")]
    UnsupportedEndpoint(String),

    #[error("Record store error: {0}")]
    Database(#[from] DatabaseError),

    #[error("User directory error: {0}")]
    UserDirectory(#[from] UserDirectoryError),

    #[error("Interim result error: {0}")]
    InterimResults(#[from] InterimResultError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

impl ResourceRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            ResourceRouteError::PermissionDenied(_) | ResourceRouteError::UnknownCaller => StatusCode::UNAUTHORIZED,
            ResourceRouteError::UserNotFound(_)
            | ResourceRouteError::ResourceNotFound(_)
            | ResourceRouteError::UnsupportedEndpoint(_)
            | ResourceRouteError::NotResumable(NotResumableReason::CheckpointMissing) => StatusCode::BAD_REQUEST,
            ResourceRouteError::NotResumable(_) => StatusCode::NOT_FOUND,
            ResourceRouteError::Database(_)
            | ResourceRouteError::UserDirectory(_)
            | ResourceRouteError::InterimResults(_)
            | ResourceRouteError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ResourceRouteError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if code.is_server_error() {
            error!(error = %self, "Resource route failed");
        }
        (code, Json(SimpleResponse::error(self.to_string()))).into_response()
    }
}
