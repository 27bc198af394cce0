use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime, doc, oid::ObjectId};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::AppError;
use crate::domain::entities::Tweet;
use crate::repositories::db_error;

#[async_trait]
pub trait TweetRepository: Send + Sync {
    async fn create(&self, tweet: Tweet) -> Result<Tweet, AppError>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Tweet>, AppError>;
    /// 최신순
    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Tweet>, AppError>;
    async fn update_content(&self, id: &ObjectId, content: &str) -> Result<Option<Tweet>, AppError>;
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}

pub struct MongoTweetRepository {
    collection: Collection<Tweet>,
}

impl MongoTweetRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection::<Tweet>("tweets"),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let owner_index = IndexModel::builder()
            .keys(doc! { "owner": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("owner_created_at".to_string()).build())
            .build();

        self.collection.create_index(owner_index).await.map_err(db_error)?;
        Ok(())
    }
}

#[async_trait]
impl TweetRepository for MongoTweetRepository {
    async fn create(&self, tweet: Tweet) -> Result<Tweet, AppError> {
        self.collection.insert_one(&tweet).await.map_err(db_error)?;
        Ok(tweet)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Tweet>, AppError> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Tweet>, AppError> {
        self.collection
            .find(doc! { "owner": *owner })
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn update_content(&self, id: &ObjectId, content: &str) -> Result<Option<Tweet>, AppError> {
        self.collection
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": { "content": content, "updated_at": DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }
}
