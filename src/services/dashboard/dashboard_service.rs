//! 채널 대시보드
//!
//! 통계는 매 요청마다 저장소 집계로 계산합니다 (별도 카운터 없음).

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::dto::ChannelStats;
use crate::domain::entities::EdgeKind;
use crate::repositories::{EdgeRepository, Repositories, VideoRepository};

pub struct DashboardService {
    videos: Arc<dyn VideoRepository>,
    edges: Arc<dyn EdgeRepository>,
}

impl DashboardService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            videos: repositories.videos.clone(),
            edges: repositories.edges.clone(),
        }
    }

    /// 채널 통계: 동영상 수, 총 조회수, 구독자 수, 채널 동영상이 받은 좋아요 수
    pub async fn channel_stats(&self, channel: &ObjectId) -> Result<ChannelStats, AppError> {
        let video_stats = self.videos.stats_for_owner(channel).await?;
        let total_subscribers = self.edges.count_by_target(channel, EdgeKind::Subscription).await?;

        let video_ids: Vec<ObjectId> = self.videos
            .list_by_owner(channel)
            .await?
            .iter()
            .map(|v| v.id)
            .collect();
        let total_likes = self.edges.count_by_targets(&video_ids, EdgeKind::VideoLike).await?;

        Ok(ChannelStats {
            total_videos: video_stats.total_videos,
            total_views: video_stats.total_views,
            total_subscribers,
            total_likes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Edge, MediaAsset, Video};

    fn asset(kind: &str) -> MediaAsset {
        MediaAsset {
            url: format!("https://media.example/{}", kind),
            public_id: kind.to_string(),
            resource_type: kind.to_string(),
            duration: None,
        }
    }

    #[actix_web::test]
    async fn test_channel_stats_are_derived_from_records() {
        let repositories = Repositories::in_memory();
        let service = DashboardService::new(&repositories);
        let channel = ObjectId::new();
        let fan = ObjectId::new();

        let mut video = Video::new(channel, "V1", "", asset("video"), asset("image"));
        video.views = 7;
        let video = repositories.videos.create(video).await.unwrap();
        repositories.videos.create(Video::new(channel, "V2", "", asset("video"), asset("image"))).await.unwrap();

        repositories.edges.insert(Edge::new(fan, video.id, EdgeKind::VideoLike)).await.unwrap();
        repositories.edges.insert(Edge::new(fan, channel, EdgeKind::Subscription)).await.unwrap();

        let stats = service.channel_stats(&channel).await.unwrap();
        assert_eq!(
            stats,
            ChannelStats {
                total_videos: 2,
                total_views: 7,
                total_subscribers: 1,
                total_likes: 1,
            }
        );
    }
}
