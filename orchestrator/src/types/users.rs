use serde::{Deserialize, Serialize};

/// Platform role of a user. Role and group are store-authoritative and are
/// looked up per request when checking a target id, never trusted from the
/// caller's own claims.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    Guest,
    User,
    Admin,
    Superadmin,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub user_id: String,
    pub group: String,
    pub role: UserRole,
}

impl UserInfo {
    pub fn has_superadmin_role(&self) -> bool {
        matches!(self.role, UserRole::Superadmin)
    }
}
