pub mod mongodb;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::users::UserInfo;

#[derive(Error, Debug)]
pub enum UserDirectoryError {
    #[error("User directory driver error: {0}")]
    Driver(#[from] ::mongodb::error::Error),

    #[error("Stored user entry is corrupted: {0}")]
    Corruption(String),
}

/// User identity collaborator. Credential persistence and verification live
/// outside this service; the directory only answers existence and role/group
/// lookups for access decisions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserInfo>, UserDirectoryError>;
}
