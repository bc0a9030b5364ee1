use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use super::{InterimResultError, InterimResultStore};
use crate::core::client::database::constant::INTERIM_RESULTS_COLLECTION;
use crate::core::client::database::mongodb::MongoDbClient;
use crate::types::jobs::resource_id::ResourceId;

pub struct MongoInterimResultStore {
    collection: Collection<Document>,
}

impl MongoInterimResultStore {
    pub fn new(client: &MongoDbClient) -> Self {
        Self { collection: client.collection(INTERIM_RESULTS_COLLECTION) }
    }
}

#[async_trait]
impl InterimResultStore for MongoInterimResultStore {
    async fn has_checkpoint(
        &self,
        user_id: &str,
        resource_id: &ResourceId,
        pc_step: u32,
        iteration: u32,
    ) -> Result<bool, InterimResultError> {
        let filter = doc! {
            "user_id": user_id,
            "resource_id": resource_id.as_str(),
            "iteration": iteration as i64,
            "step": pc_step as i64,
        };
        Ok(self.collection.find_one(filter, None).await?.is_some())
    }
}
