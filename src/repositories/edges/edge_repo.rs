//! 관계 엣지(좋아요, 구독) 리포지토리
//!
//! 좋아요는 `likes`, 구독은 `subscriptions` 컬렉션에 저장되며 두 컬렉션 모두
//! (actor, target, kind) 유니크 인덱스를 가집니다. 카운트는 항상 조회로 계산하고
//! 별도 카운터 필드를 두지 않습니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::{Edge, EdgeKind};
use crate::repositories::{db_error, is_duplicate_key};

#[async_trait]
pub trait EdgeRepository: Send + Sync {
    async fn find(&self, actor: &ObjectId, target: &ObjectId, kind: EdgeKind) -> Result<Option<Edge>, AppError>;

    /// 엣지 저장. 같은 (actor, target, kind)가 이미 있으면 `ConflictError`
    async fn insert(&self, edge: Edge) -> Result<Edge, AppError>;

    /// 삭제되었으면 true (다른 요청이 먼저 지웠으면 false)
    async fn delete(&self, edge: &Edge) -> Result<bool, AppError>;

    async fn count_by_target(&self, target: &ObjectId, kind: EdgeKind) -> Result<u64, AppError>;
    async fn count_by_targets(&self, targets: &[ObjectId], kind: EdgeKind) -> Result<u64, AppError>;
    async fn count_by_actor(&self, actor: &ObjectId, kind: EdgeKind) -> Result<u64, AppError>;

    /// 최신순
    async fn list_by_target(&self, target: &ObjectId, kind: EdgeKind) -> Result<Vec<Edge>, AppError>;
    /// 최신순
    async fn list_by_actor(&self, actor: &ObjectId, kind: EdgeKind) -> Result<Vec<Edge>, AppError>;
}

pub struct MongoEdgeRepository {
    likes: Collection<Edge>,
    subscriptions: Collection<Edge>,
}

impl MongoEdgeRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            likes: db.collection::<Edge>(EdgeKind::VideoLike.collection()),
            subscriptions: db.collection::<Edge>(EdgeKind::Subscription.collection()),
        }
    }

    fn collection(&self, kind: EdgeKind) -> &Collection<Edge> {
        match kind {
            EdgeKind::Subscription => &self.subscriptions,
            _ => &self.likes,
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        for collection in [&self.likes, &self.subscriptions] {
            let unique_edge = IndexModel::builder()
                .keys(doc! { "actor": 1, "target": 1, "kind": 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .name("actor_target_kind_unique".to_string())
                    .build())
                .build();

            let by_target = IndexModel::builder()
                .keys(doc! { "target": 1, "kind": 1 })
                .options(IndexOptions::builder().name("target_kind".to_string()).build())
                .build();

            collection
                .create_indexes([unique_edge, by_target])
                .await
                .map_err(db_error)?;
        }

        Ok(())
    }
}

fn kind_bson(kind: EdgeKind) -> AppResult<mongodb::bson::Bson> {
    to_bson(&kind).with_context(|| format!("엣지 종류 직렬화 실패 ({:?})", kind))
}

#[async_trait]
impl EdgeRepository for MongoEdgeRepository {
    async fn find(&self, actor: &ObjectId, target: &ObjectId, kind: EdgeKind) -> Result<Option<Edge>, AppError> {
        self.collection(kind)
            .find_one(doc! { "actor": *actor, "target": *target, "kind": kind_bson(kind)? })
            .await
            .map_err(db_error)
    }

    async fn insert(&self, edge: Edge) -> Result<Edge, AppError> {
        match self.collection(edge.kind).insert_one(&edge).await {
            Ok(_) => Ok(edge),
            Err(e) if is_duplicate_key(&e) => Err(AppError::ConflictError(format!(
                "{} already exists",
                edge.kind.as_str()
            ))),
            Err(e) => Err(db_error(e)),
        }
    }

    async fn delete(&self, edge: &Edge) -> Result<bool, AppError> {
        let result = self.collection(edge.kind)
            .delete_one(doc! { "_id": edge.id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn count_by_target(&self, target: &ObjectId, kind: EdgeKind) -> Result<u64, AppError> {
        self.collection(kind)
            .count_documents(doc! { "target": *target, "kind": kind_bson(kind)? })
            .await
            .map_err(db_error)
    }

    async fn count_by_targets(&self, targets: &[ObjectId], kind: EdgeKind) -> Result<u64, AppError> {
        if targets.is_empty() {
            return Ok(0);
        }

        self.collection(kind)
            .count_documents(doc! { "target": { "$in": targets.to_vec() }, "kind": kind_bson(kind)? })
            .await
            .map_err(db_error)
    }

    async fn count_by_actor(&self, actor: &ObjectId, kind: EdgeKind) -> Result<u64, AppError> {
        self.collection(kind)
            .count_documents(doc! { "actor": *actor, "kind": kind_bson(kind)? })
            .await
            .map_err(db_error)
    }

    async fn list_by_target(&self, target: &ObjectId, kind: EdgeKind) -> Result<Vec<Edge>, AppError> {
        self.collection(kind)
            .find(doc! { "target": *target, "kind": kind_bson(kind)? })
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn list_by_actor(&self, actor: &ObjectId, kind: EdgeKind) -> Result<Vec<Edge>, AppError> {
        self.collection(kind)
            .find(doc! { "actor": *actor, "kind": kind_bson(kind)? })
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }
}
