//! 재생목록 리포지토리
//!
//! 동영상 추가/제거는 "아직 없을 때만 추가", "있을 때만 제거" 조건을 필터에 담은
//! 단일 원자적 갱신입니다. 조건이 맞지 않으면 `None`을 반환합니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime, Document, doc, oid::ObjectId};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::AppError;
use crate::domain::entities::Playlist;
use crate::repositories::db_error;

#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn create(&self, playlist: Playlist) -> Result<Playlist, AppError>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Playlist>, AppError>;
    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Playlist>, AppError>;
    async fn update_details(
        &self,
        id: &ObjectId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Playlist>, AppError>;
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;

    /// 동영상이 아직 없을 때만 맨 뒤에 추가
    async fn add_video(&self, id: &ObjectId, video: &ObjectId) -> Result<Option<Playlist>, AppError>;

    /// 동영상이 있을 때만 제거
    async fn remove_video(&self, id: &ObjectId, video: &ObjectId) -> Result<Option<Playlist>, AppError>;
}

pub struct MongoPlaylistRepository {
    collection: Collection<Playlist>,
}

impl MongoPlaylistRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection::<Playlist>("playlists"),
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

    async fn conditional_update(&self, filter: Document, update: Document) -> Result<Option<Playlist>, AppError> {
        self.collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)
    }
}

#[async_trait]
impl PlaylistRepository for MongoPlaylistRepository {
    async fn create(&self, playlist: Playlist) -> Result<Playlist, AppError> {
        self.collection.insert_one(&playlist).await.map_err(db_error)?;
        Ok(playlist)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Playlist>, AppError> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Playlist>, AppError> {
        self.collection
            .find(doc! { "owner": *owner })
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn update_details(
        &self,
        id: &ObjectId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Playlist>, AppError> {
        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(name) = name {
            set.insert("name", name);
        }
        if let Some(description) = description {
            set.insert("description", description);
        }

        self.conditional_update(doc! { "_id": *id }, doc! { "$set": set }).await
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn add_video(&self, id: &ObjectId, video: &ObjectId) -> Result<Option<Playlist>, AppError> {
        self.conditional_update(
            doc! { "_id": *id, "videos": { "$ne": *video } },
            doc! {
                "$push": { "videos": *video },
                "$set": { "updated_at": DateTime::now() },
            },
        )
        .await
    }

    async fn remove_video(&self, id: &ObjectId, video: &ObjectId) -> Result<Option<Playlist>, AppError> {
        self.conditional_update(
            doc! { "_id": *id, "videos": *video },
            doc! {
                "$pull": { "videos": *video },
                "$set": { "updated_at": DateTime::now() },
            },
        )
        .await
    }
}
