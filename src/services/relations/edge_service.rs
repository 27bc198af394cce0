//! 좋아요/구독 토글과 관계 목록 조회
//!
//! 토글은 (actor, target, kind) 단위로 동작합니다.
//!
//! 1. 대상 ID 파싱 (400)
//! 2. 대상 존재 확인 (404), 자기 자신 구독 금지 (400)
//! 3. 엣지가 있으면 삭제 → `active: false`
//! 4. 없으면 생성 → `active: true`
//!
//! 동시에 들어온 두 생성 요청은 저장소의 유니크 제약에서 하나만 성공합니다.
//! 충돌한 쪽은 엣지를 다시 읽어 관찰된 상태를 그대로 보고합니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::dto::{OwnerSummary, ToggleResponse, VideoResponse};
use crate::domain::entities::{Edge, EdgeKind};
use crate::repositories::{
    CommentRepository, EdgeRepository, Repositories, TweetRepository, UserRepository,
    VideoRepository,
};
use crate::services::ownership::{owner_summaries, parse_object_id};

pub struct EdgeService {
    edges: Arc<dyn EdgeRepository>,
    users: Arc<dyn UserRepository>,
    videos: Arc<dyn VideoRepository>,
    comments: Arc<dyn CommentRepository>,
    tweets: Arc<dyn TweetRepository>,
}

impl EdgeService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            edges: repositories.edges.clone(),
            users: repositories.users.clone(),
            videos: repositories.videos.clone(),
            comments: repositories.comments.clone(),
            tweets: repositories.tweets.clone(),
        }
    }

    /// 엣지 토글
    pub async fn toggle(&self, actor: &ObjectId, raw_target: &str, kind: EdgeKind) -> Result<ToggleResponse, AppError> {
        let target = parse_object_id(raw_target, kind.target_label())?;
        self.ensure_target(actor, &target, kind).await?;

        let active = match self.edges.find(actor, &target, kind).await? {
            Some(edge) => {
                self.edges.delete(&edge).await?;
                false
            }
            None => match self.edges.insert(Edge::new(*actor, target, kind)).await {
                Ok(_) => true,
                Err(AppError::ConflictError(_)) => {
                    log::debug!("동시 토글 충돌, 재조회: {} {} {}", actor, target, kind.as_str());
                    self.edges.find(actor, &target, kind).await?.is_some()
                }
                Err(e) => return Err(e),
            },
        };

        log::debug!("토글 {}: actor={} target={} active={}", kind.as_str(), actor, target, active);

        Ok(ToggleResponse {
            target_id: target.to_hex(),
            kind,
            active,
        })
    }

    /// 사용자가 좋아요한 동영상 (최근 좋아요 순)
    ///
    /// 삭제되었거나 비공개로 바뀐 동영상은 제외됩니다.
    pub async fn liked_videos(&self, actor: &ObjectId) -> Result<Vec<VideoResponse>, AppError> {
        let likes = self.edges.list_by_actor(actor, EdgeKind::VideoLike).await?;
        let ids: Vec<ObjectId> = likes.iter().map(|e| e.target).collect();

        let videos = self.videos.find_by_ids(&ids).await?;
        let owners: Vec<ObjectId> = videos.iter().map(|v| v.owner).collect();
        let summaries = owner_summaries(&self.users, &owners).await?;

        Ok(ids
            .iter()
            .filter_map(|id| videos.iter().find(|v| &v.id == id))
            .filter(|video| video.is_visible_to(Some(actor)))
            .filter_map(|video| {
                summaries
                    .get(&video.owner)
                    .map(|owner| VideoResponse::new(video, owner.clone()))
            })
            .collect())
    }

    /// 채널 구독자 목록
    pub async fn subscribers(&self, raw_channel: &str) -> Result<Vec<OwnerSummary>, AppError> {
        let channel = parse_object_id(raw_channel, "channel")?;
        let edges = self.edges.list_by_target(&channel, EdgeKind::Subscription).await?;
        let ids: Vec<ObjectId> = edges.iter().map(|e| e.actor).collect();

        self.summaries_in_order(&ids).await
    }

    /// 사용자가 구독 중인 채널 목록
    pub async fn subscribed_channels(&self, raw_subscriber: &str) -> Result<Vec<OwnerSummary>, AppError> {
        let subscriber = parse_object_id(raw_subscriber, "subscriber")?;
        let edges = self.edges.list_by_actor(&subscriber, EdgeKind::Subscription).await?;
        let ids: Vec<ObjectId> = edges.iter().map(|e| e.target).collect();

        self.summaries_in_order(&ids).await
    }

    async fn summaries_in_order(&self, ids: &[ObjectId]) -> Result<Vec<OwnerSummary>, AppError> {
        let users = self.users.find_by_ids(ids).await?;

        Ok(ids
            .iter()
            .filter_map(|id| users.iter().find(|u| &u.id == id))
            .map(OwnerSummary::from)
            .collect())
    }

    async fn ensure_target(&self, actor: &ObjectId, target: &ObjectId, kind: EdgeKind) -> Result<(), AppError> {
        let exists = match kind {
            EdgeKind::VideoLike => self.videos.find_by_id(target).await?.is_some(),
            EdgeKind::CommentLike => self.comments.find_by_id(target).await?.is_some(),
            EdgeKind::TweetLike => self.tweets.find_by_id(target).await?.is_some(),
            EdgeKind::Subscription => {
                if actor == target {
                    return Err(AppError::ValidationError(
                        "You cannot subscribe to your own channel".to_string(),
                    ));
                }
                self.users.find_by_id(target).await?.is_some()
            }
        };

        if !exists {
            return Err(AppError::NotFound(format!(
                "{} not found",
                match kind {
                    EdgeKind::VideoLike => "Video",
                    EdgeKind::CommentLike => "Comment",
                    EdgeKind::TweetLike => "Tweet",
                    EdgeKind::Subscription => "Channel",
                }
            )));
        }

        Ok(())
    }
}
