use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::core::config::Config;
use crate::server::error::ResourceRouteError;
use crate::types::users::UserInfo;

/// Header carrying the caller id established by the upstream gateway.
/// Credential verification happens there; this service resolves the id
/// against the user directory to obtain the store-authoritative role and
/// group.
pub const CALLER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller of the current request.
pub struct CallerIdentity(pub UserInfo);

#[async_trait]
impl FromRequestParts<Arc<Config>> for CallerIdentity {
    type Rejection = ResourceRouteError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<Config>) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(CALLER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(ResourceRouteError::UnknownCaller)?;

        let info = state.user_directory().get_user(user_id).await?.ok_or(ResourceRouteError::UnknownCaller)?;
        Ok(CallerIdentity(info))
    }
}
