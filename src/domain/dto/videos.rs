//! 동영상 요청/응답 DTO
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::rfc3339;
use crate::domain::dto::users::OwnerSummary;
use crate::domain::entities::Video;

/// 동영상 목록 조회 쿼리
///
/// `GET /videos?page=1&limit=10&query=rust&sortBy=views&sortType=desc&userId=...`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<String>,
}

/// 동영상 업로드 폼의 텍스트 필드
#[derive(Debug, Clone, Default, Validate)]
pub struct PublishVideoRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
}

/// 동영상 수정 폼의 텍스트 필드 (썸네일 파일은 별도)
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateVideoRequest {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Description cannot be empty"))]
    pub description: Option<String>,
}

impl UpdateVideoRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: String,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner: OwnerSummary,
    pub created_at: String,
    pub updated_at: String,
}

impl VideoResponse {
    pub fn new(video: &Video, owner: OwnerSummary) -> Self {
        Self {
            id: video.id.to_hex(),
            video_file: video.video_file.url.clone(),
            thumbnail: video.thumbnail.url.clone(),
            title: video.title.clone(),
            description: video.description.clone(),
            duration: video.duration,
            views: video.views,
            is_published: video.is_published,
            owner,
            created_at: rfc3339(&video.created_at),
            updated_at: rfc3339(&video.updated_at),
        }
    }
}
