pub mod constant;
pub mod error;
pub mod mongodb;

use async_trait::async_trait;

use crate::types::jobs::record::{JobRecord, StoredRecord};
use crate::types::jobs::resource_id::ResourceId;
pub use error::DatabaseError;

/// Record store consumed by the façades. Keys are `(user, resource id,
/// iteration)`; the store additionally maintains a per-resource "latest
/// iteration" pointer and a cooperative termination flag. `commit` is
/// last-writer-wins; there is no lock over a key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Latest-iteration pointer and the record it points at. The two are
    /// independently absent: a legacy record can exist without a pointer, in
    /// which case the base record is returned with no iteration.
    async fn get_latest(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
    ) -> Result<(Option<u32>, Option<StoredRecord>), DatabaseError>;

    /// Record of one specific iteration. Iteration 1 addresses the base key.
    async fn get(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
        iteration: u32,
    ) -> Result<Option<StoredRecord>, DatabaseError>;

    /// All iterations of a resource, ordered ascending by iteration.
    async fn get_all_iterations(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
    ) -> Result<Vec<(u32, StoredRecord)>, DatabaseError>;

    /// Writes a record under its iteration and advances the latest pointer.
    /// Returns whether the write was applied.
    async fn commit(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
        iteration: u32,
        stored: StoredRecord,
    ) -> Result<bool, DatabaseError>;

    /// Flags a termination request. This is advisory: the worker polls the
    /// flag, nothing is stopped here and no record is ever deleted. A missing
    /// iteration addresses the latest one.
    async fn commit_termination(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
        iteration: Option<u32>,
    ) -> Result<(), DatabaseError>;

    /// Every record of the user, in store-native order.
    async fn list_resources(&self, user_id: &str) -> Result<Vec<JobRecord>, DatabaseError>;
}
