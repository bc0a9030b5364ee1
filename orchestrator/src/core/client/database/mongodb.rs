use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, DateTime, Document};
use mongodb::options::{FindOneOptions, FindOptions, UpdateOptions};
use mongodb::{Client, Collection, Database};
use std::sync::Arc;
use tracing::debug;

use super::constant::{
    RESOURCE_POINTERS_COLLECTION, RESOURCE_RECORDS_COLLECTION, TERMINATION_REQUESTS_COLLECTION,
};
use super::{DatabaseError, JobStore};
use crate::types::jobs::record::{JobRecord, StoredRecord};
use crate::types::jobs::resource_id::ResourceId;
use crate::types::params::DatabaseParams;

/// MongoDB adapter of the [`JobStore`] interface. One document per
/// `(user, resource, iteration)` record plus a pointer document per resource;
/// termination requests live in their own collection so flagging never
/// touches the record payload.
pub struct MongoDbClient {
    client: Client,
    database: Arc<Database>,
}

impl MongoDbClient {
    pub async fn new(params: &DatabaseParams) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&params.connection_uri).await?;
        let database = Arc::new(client.database(&params.database_name));
        Ok(Self { client, database })
    }

    /// The driver is internally reference counted, cloning is cheap.
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    fn records(&self) -> Collection<Document> {
        self.collection(RESOURCE_RECORDS_COLLECTION)
    }

    fn pointers(&self) -> Collection<Document> {
        self.collection(RESOURCE_POINTERS_COLLECTION)
    }

    fn terminations(&self) -> Collection<Document> {
        self.collection(TERMINATION_REQUESTS_COLLECTION)
    }

    fn record_key(user_id: &str, resource_id: &ResourceId) -> Document {
        doc! { "user_id": user_id, "resource_id": resource_id.as_str() }
    }

    /// Decodes the record payload of one document; any decoding failure or
    /// unknown schema version is reported as [`DatabaseError::Corruption`].
    fn decode_stored(document: &Document) -> Result<StoredRecord, DatabaseError> {
        let payload = document
            .get_document("payload")
            .map_err(|e| DatabaseError::Corruption(format!("missing record payload: {e}")))?;
        let stored: StoredRecord = bson::from_bson(Bson::Document(payload.clone()))
            .map_err(|e| DatabaseError::Corruption(e.to_string()))?;
        stored
            .ensure_supported()
            .map_err(|version| DatabaseError::Corruption(format!("unsupported record schema version {version}")))?;
        Ok(stored)
    }

    fn decode_iteration(document: &Document) -> Result<u32, DatabaseError> {
        let iteration = document
            .get_i64("iteration")
            .map_err(|e| DatabaseError::Corruption(format!("missing record iteration: {e}")))?;
        u32::try_from(iteration).map_err(|_| DatabaseError::Corruption(format!("invalid iteration {iteration}")))
    }
}

#[async_trait]
impl JobStore for MongoDbClient {
    async fn get_latest(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
    ) -> Result<(Option<u32>, Option<StoredRecord>), DatabaseError> {
        let pointer = self.pointers().find_one(Self::record_key(user_id, resource_id), None).await?;
        let latest = match pointer {
            Some(doc) => Some(
                doc.get_i64("latest_iteration")
                    .ok()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| DatabaseError::Corruption("invalid latest iteration pointer".to_string()))?,
            ),
            None => None,
        };
        // Without a pointer the base record may still exist (legacy writes).
        let stored = self.get(user_id, resource_id, latest.unwrap_or(1)).await?;
        Ok((latest, stored))
    }

    async fn get(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
        iteration: u32,
    ) -> Result<Option<StoredRecord>, DatabaseError> {
        let mut filter = Self::record_key(user_id, resource_id);
        filter.insert("iteration", iteration as i64);
        let document = self.records().find_one(filter, FindOneOptions::default()).await?;
        document.as_ref().map(Self::decode_stored).transpose()
    }

    async fn get_all_iterations(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
    ) -> Result<Vec<(u32, StoredRecord)>, DatabaseError> {
        let options = FindOptions::builder().sort(doc! { "iteration": 1 }).build();
        let mut cursor = self.records().find(Self::record_key(user_id, resource_id), options).await?;
        let mut iterations = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            iterations.push((Self::decode_iteration(&document)?, Self::decode_stored(&document)?));
        }
        Ok(iterations)
    }

    async fn commit(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
        iteration: u32,
        stored: StoredRecord,
    ) -> Result<bool, DatabaseError> {
        let payload = bson::to_bson(&stored)?;
        let mut filter = Self::record_key(user_id, resource_id);
        filter.insert("iteration", iteration as i64);
        let update = doc! { "$set": { "payload": payload } };
        let options = UpdateOptions::builder().upsert(true).build();
        let result = self.records().update_one(filter, update, options).await?;

        let pointer_update = doc! { "$max": { "latest_iteration": iteration as i64 } };
        let pointer_options = UpdateOptions::builder().upsert(true).build();
        self.pointers().update_one(Self::record_key(user_id, resource_id), pointer_update, pointer_options).await?;

        debug!(user_id, resource_id = %resource_id, iteration, "Committed resource record");
        Ok(result.matched_count > 0 || result.upserted_id.is_some())
    }

    async fn commit_termination(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
        iteration: Option<u32>,
    ) -> Result<(), DatabaseError> {
        let mut filter = Self::record_key(user_id, resource_id);
        match iteration {
            Some(n) => filter.insert("iteration", n as i64),
            None => filter.insert("iteration", Bson::Null),
        };
        let update = doc! { "$set": { "requested_at": DateTime::now() } };
        let options = UpdateOptions::builder().upsert(true).build();
        self.terminations().update_one(filter, update, options).await?;
        debug!(user_id, resource_id = %resource_id, "Committed termination request");
        Ok(())
    }

    async fn list_resources(&self, user_id: &str) -> Result<Vec<JobRecord>, DatabaseError> {
        let mut cursor = self.records().find(doc! { "user_id": user_id }, None).await?;
        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            records.push(Self::decode_stored(&document)?.record);
        }
        Ok(records)
    }
}
