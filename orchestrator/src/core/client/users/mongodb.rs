use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Collection;

use super::{UserDirectory, UserDirectoryError};
use crate::core::client::database::constant::USERS_COLLECTION;
use crate::core::client::database::mongodb::MongoDbClient;
use crate::types::users::UserInfo;

pub struct MongoUserDirectory {
    collection: Collection<UserInfo>,
}

impl MongoUserDirectory {
    pub fn new(client: &MongoDbClient) -> Self {
        Self { collection: client.collection(USERS_COLLECTION) }
    }
}

#[async_trait]
impl UserDirectory for MongoUserDirectory {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserInfo>, UserDirectoryError> {
        Ok(self.collection.find_one(doc! { "user_id": user_id }, None).await?)
    }
}
