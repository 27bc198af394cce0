use serde::{Deserialize, Serialize};

use crate::domain::entities::EdgeKind;

/// 토글 결과
///
/// `active`가 true면 엣지가 생성된 상태(좋아요/구독 중)입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub target_id: String,
    pub kind: EdgeKind,
    pub active: bool,
}

/// 채널 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_videos: u64,
    pub total_views: i64,
    pub total_subscribers: u64,
    pub total_likes: u64,
}
