use crate::core::client::users::UserDirectory;
use crate::server::error::{PermissionReason, ResourceRouteError};
use crate::types::users::{UserInfo, UserRole};

/// Stateless role-based access decision over job records.
///
/// Permission model:
/// - guest and user roles can only access resources of their own user id
/// - admins can access resources of users in the same group, except
///   superadmins
/// - superadmins can access everything
pub struct AccessGate;

impl AccessGate {
    /// Checks whether `caller` may access resources owned by
    /// `target_user_id`. The target's role and group are looked up in the
    /// user directory, never taken from the request.
    pub async fn check(
        caller: &UserInfo,
        target_user_id: &str,
        directory: &dyn UserDirectory,
    ) -> Result<(), ResourceRouteError> {
        if caller.has_superadmin_role() {
            return Ok(());
        }

        if matches!(caller.role, UserRole::Guest | UserRole::User) && caller.user_id != target_user_id {
            return Err(ResourceRouteError::PermissionDenied(PermissionReason::WrongUser));
        }

        let target = directory
            .get_user(target_user_id)
            .await?
            .ok_or_else(|| ResourceRouteError::UserNotFound(target_user_id.to_string()))?;

        if caller.role == UserRole::Admin {
            if target.has_superadmin_role() {
                return Err(ResourceRouteError::PermissionDenied(PermissionReason::WrongRole));
            }
            if target.group != caller.group {
                return Err(ResourceRouteError::PermissionDenied(PermissionReason::WrongGroup));
            }
        }

        Ok(())
    }
}
