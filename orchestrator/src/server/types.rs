use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::server::error::ResourceRouteError;
use crate::types::jobs::record::JobRecord;

/// Standard envelope for acknowledgements and errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SimpleResponse {
    pub status: String,
    pub message: String,
}

impl SimpleResponse {
    pub fn new(status: &str, message: impl Into<String>) -> Self {
        Self { status: status.to_string(), message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }

    /// Termination requests are acknowledged, never confirmed.
    pub fn accepted(message: impl Into<String>) -> Self {
        Self::new("accepted", message)
    }

    pub fn finished(message: impl Into<String>) -> Self {
        Self::new("finished", message)
    }
}

/// Result type used by all resource route handlers.
pub type ResourceRouteResult = Result<Response<axum::body::Body>, ResourceRouteError>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResourceListResponse {
    pub resource_list: Vec<JobRecord>,
}

/// Query parameters of the resource listing endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    /// Maximum number of entries to return.
    pub num: Option<usize>,
    /// `all` or a status wire form, matched case-insensitively.
    #[serde(rename = "type")]
    pub type_: Option<String>,
}
