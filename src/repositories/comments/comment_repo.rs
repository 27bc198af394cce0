use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime, doc, oid::ObjectId};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::AppError;
use crate::domain::dto::PageRequest;
use crate::domain::entities::Comment;
use crate::repositories::db_error;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: Comment) -> Result<Comment, AppError>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, AppError>;
    /// 동영상의 댓글 (최신순, 페이지 단위)
    async fn list_by_video(&self, video: &ObjectId, page: PageRequest) -> Result<Vec<Comment>, AppError>;
    async fn update_content(&self, id: &ObjectId, content: &str) -> Result<Option<Comment>, AppError>;
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}

pub struct MongoCommentRepository {
    collection: Collection<Comment>,
}

impl MongoCommentRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection::<Comment>("comments"),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let video_index = IndexModel::builder()
            .keys(doc! { "video": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("video_created_at".to_string()).build())
            .build();

        self.collection.create_index(video_index).await.map_err(db_error)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, AppError> {
        self.collection.insert_one(&comment).await.map_err(db_error)?;
        Ok(comment)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, AppError> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn list_by_video(&self, video: &ObjectId, page: PageRequest) -> Result<Vec<Comment>, AppError> {
        self.collection
            .find(doc! { "video": *video })
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(page.skip)
            .limit(page.limit as i64)
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn update_content(&self, id: &ObjectId, content: &str) -> Result<Option<Comment>, AppError> {
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
