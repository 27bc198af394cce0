//! 동영상 리포지토리

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, DateTime, Document, doc, oid::ObjectId, to_bson};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, ErrorContext};
use crate::domain::dto::PageRequest;
use crate::domain::entities::{MediaAsset, Video};
use crate::repositories::{bson_to_i64, db_error};

/// 정렬 기준 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSortField {
    CreatedAt,
    Views,
    Duration,
    Title,
}

impl VideoSortField {
    /// `sortBy` 쿼리 값 해석 (알 수 없는 값이면 None)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "views" => Some(Self::Views),
            "duration" => Some(Self::Duration),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    fn field_name(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Views => "views",
            Self::Duration => "duration",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSort {
    pub field: VideoSortField,
    pub ascending: bool,
}

impl Default for VideoSort {
    /// 최신순
    fn default() -> Self {
        Self {
            field: VideoSortField::CreatedAt,
            ascending: false,
        }
    }
}

/// 목록 조회 조건
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    /// 제목 부분 일치 (대소문자 무시)
    pub title_contains: Option<String>,
    pub owner: Option<ObjectId>,
    /// 비공개 영상도 볼 수 있는 시청자 (자기 영상에 한함)
    pub viewer: Option<ObjectId>,
}

impl VideoFilter {
    pub fn matches(&self, video: &Video) -> bool {
        if let Some(owner) = &self.owner {
            if &video.owner != owner {
                return false;
            }
        }
        if let Some(needle) = &self.title_contains {
            if !video.title.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        video.is_visible_to(self.viewer.as_ref())
    }

    fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(owner) = self.owner {
            filter.insert("owner", owner);
        }
        if let Some(needle) = &self.title_contains {
            filter.insert(
                "title",
                doc! { "$regex": regex::escape(needle), "$options": "i" },
            );
        }
        match self.viewer {
            Some(viewer) => {
                filter.insert("$or", vec![doc! { "is_published": true }, doc! { "owner": viewer }]);
            }
            None => {
                filter.insert("is_published", true);
            }
        }

        filter
    }
}

/// 소유자별 동영상 집계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerVideoStats {
    pub total_videos: u64,
    pub total_views: i64,
}

/// 동영상 변경 내용 (None인 필드는 유지)
#[derive(Debug, Clone, Default)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<MediaAsset>,
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create(&self, video: Video) -> Result<Video, AppError>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Video>, AppError>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Video>, AppError>;
    async fn list(&self, filter: &VideoFilter, sort: VideoSort, page: PageRequest) -> Result<Vec<Video>, AppError>;
    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Video>, AppError>;
    async fn update(&self, id: &ObjectId, update: VideoUpdate) -> Result<Option<Video>, AppError>;
    /// 공개 여부를 한 번의 갱신으로 반전하고 변경 후 문서를 반환
    async fn toggle_published(&self, id: &ObjectId) -> Result<Option<Video>, AppError>;
    async fn increment_views(&self, id: &ObjectId) -> Result<Option<Video>, AppError>;
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
    async fn stats_for_owner(&self, owner: &ObjectId) -> Result<OwnerVideoStats, AppError>;
}

pub struct MongoVideoRepository {
    collection: Collection<Video>,
}

impl MongoVideoRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection::<Video>("videos"),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let owner_index = IndexModel::builder()
            .keys(doc! { "owner": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("owner_created_at".to_string()).build())
            .build();

        let published_index = IndexModel::builder()
            .keys(doc! { "is_published": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("published_created_at".to_string()).build())
            .build();

        self.collection
            .create_indexes([owner_index, published_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn find_one_and_update(&self, id: &ObjectId, update: Document) -> Result<Option<Video>, AppError> {
        self.collection
            .find_one_and_update(doc! { "_id": *id }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)
    }
}

#[async_trait]
impl VideoRepository for MongoVideoRepository {
    async fn create(&self, video: Video) -> Result<Video, AppError> {
        self.collection.insert_one(&video).await.map_err(db_error)?;
        Ok(video)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Video>, AppError> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Video>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn list(&self, filter: &VideoFilter, sort: VideoSort, page: PageRequest) -> Result<Vec<Video>, AppError> {
        let direction = if sort.ascending { 1 } else { -1 };
        // 동일 값 사이의 순서를 고정하기 위해 _id를 보조 정렬 키로 사용
        let mut sort_doc = Document::new();
        sort_doc.insert(sort.field.field_name(), direction);
        sort_doc.insert("_id", direction);

        self.collection
            .find(filter.to_document())
            .sort(sort_doc)
            .skip(page.skip)
            .limit(page.limit as i64)
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Video>, AppError> {
        self.collection
            .find(doc! { "owner": *owner })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn update(&self, id: &ObjectId, update: VideoUpdate) -> Result<Option<Video>, AppError> {
        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(title) = update.title {
            set.insert("title", title);
        }
        if let Some(description) = update.description {
            set.insert("description", description);
        }
        if let Some(thumbnail) = update.thumbnail {
            let thumbnail = to_bson(&thumbnail).context("썸네일 직렬화 실패")?;
            set.insert("thumbnail", thumbnail);
        }

        self.find_one_and_update(id, doc! { "$set": set }).await
    }

    async fn toggle_published(&self, id: &ObjectId) -> Result<Option<Video>, AppError> {
        // 파이프라인 갱신으로 읽기와 쓰기를 한 문서 연산에 묶음
        let pipeline = vec![doc! {
            "$set": {
                "is_published": { "$not": ["$is_published"] },
                "updated_at": "$$NOW",
            }
        }];

        self.collection
            .find_one_and_update(doc! { "_id": *id }, pipeline)
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)
    }

    async fn increment_views(&self, id: &ObjectId) -> Result<Option<Video>, AppError> {
        self.find_one_and_update(id, doc! { "$inc": { "views": 1_i64 } }).await
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn stats_for_owner(&self, owner: &ObjectId) -> Result<OwnerVideoStats, AppError> {
        let pipeline = vec![
            doc! { "$match": { "owner": *owner } },
            doc! {
                "$group": {
                    "_id": Bson::Null,
                    "total_videos": { "$sum": 1 },
                    "total_views": { "$sum": "$views" },
                }
            },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await.map_err(db_error)?;

        match cursor.try_next().await.map_err(db_error)? {
            Some(group) => Ok(OwnerVideoStats {
                total_videos: bson_to_i64(group.get("total_videos")).max(0) as u64,
                total_views: bson_to_i64(group.get("total_views")),
            }),
            None => Ok(OwnerVideoStats::default()),
        }
    }
}
