//! 관계 엣지 (좋아요, 구독)
//!
//! 엣지의 존재 자체가 "좋아요 함"/"구독 중" 상태입니다.
//! (actor, target, kind) 조합마다 최대 하나의 엣지만 존재합니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 엣지 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    VideoLike,
    CommentLike,
    TweetLike,
    /// actor가 target 채널(사용자)을 구독
    Subscription,
}

impl EdgeKind {
    /// 엣지를 저장하는 컬렉션 이름
    pub fn collection(&self) -> &'static str {
        match self {
            EdgeKind::Subscription => "subscriptions",
            _ => "likes",
        }
    }

    /// 대상 엔티티 이름 (에러 메시지용)
    pub fn target_label(&self) -> &'static str {
        match self {
            EdgeKind::VideoLike => "video",
            EdgeKind::CommentLike => "comment",
            EdgeKind::TweetLike => "tweet",
            EdgeKind::Subscription => "channel",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::VideoLike => "video_like",
            EdgeKind::CommentLike => "comment_like",
            EdgeKind::TweetLike => "tweet_like",
            EdgeKind::Subscription => "subscription",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub actor: ObjectId,
    pub target: ObjectId,
    pub kind: EdgeKind,
    pub created_at: DateTime,
}

impl Edge {
    pub fn new(actor: ObjectId, target: ObjectId, kind: EdgeKind) -> Self {
        Self {
            id: ObjectId::new(),
            actor,
            target,
            kind,
            created_at: DateTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_routes_to_collection() {
        assert_eq!(EdgeKind::VideoLike.collection(), "likes");
        assert_eq!(EdgeKind::TweetLike.collection(), "likes");
        assert_eq!(EdgeKind::Subscription.collection(), "subscriptions");
    }

    #[test]
    fn test_kind_serializes_as_snake_case() {
        let value = serde_json::to_value(EdgeKind::CommentLike).unwrap();
        assert_eq!(value, "comment_like");
        assert_eq!(EdgeKind::CommentLike.as_str(), "comment_like");
    }
}
