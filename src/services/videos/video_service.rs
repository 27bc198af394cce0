//! 동영상 서비스
//!
//! 목록/검색, 업로드, 조회(조회수 증가 및 시청 기록), 수정, 삭제, 공개 전환을 담당합니다.
//! 비공개 동영상은 소유자에게만 보이며, 다른 사용자에게는 존재하지 않는 것처럼 404를 반환합니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::{
    OwnerSummary, PageRequest, PublishVideoRequest, UpdateVideoRequest, VideoListQuery,
    VideoResponse,
};
use crate::domain::entities::{MediaAsset, Video};
use crate::repositories::{
    Repositories, UserRepository, VideoFilter, VideoRepository, VideoSort, VideoSortField,
    VideoUpdate,
};
use crate::services::media::{MediaHost, UploadedFile};
use crate::services::ownership::{ensure_owner, owner_summaries, parse_object_id, require_found};

pub struct VideoService {
    videos: Arc<dyn VideoRepository>,
    users: Arc<dyn UserRepository>,
    media: Arc<dyn MediaHost>,
}

impl VideoService {
    pub fn new(repositories: &Repositories, media: Arc<dyn MediaHost>) -> Self {
        Self {
            videos: repositories.videos.clone(),
            users: repositories.users.clone(),
            media,
        }
    }

    /// 동영상 목록
    ///
    /// 제목 검색(대소문자 무시), 소유자 필터, 정렬, 페이지를 지원합니다.
    pub async fn list(&self, query: &VideoListQuery, viewer: Option<&ObjectId>) -> Result<Vec<VideoResponse>, AppError> {
        let sort = parse_sort(query.sort_by.as_deref(), query.sort_type.as_deref())?;
        let owner = match query.user_id.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(parse_object_id(raw, "user")?),
            None => None,
        };

        let filter = VideoFilter {
            title_contains: query
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            owner,
            viewer: viewer.copied(),
        };
        let page = PageRequest::new(query.page, query.limit);

        let videos = self.videos.list(&filter, sort, page).await?;
        self.respond_all(&videos).await
    }

    /// 동영상 업로드
    pub async fn publish(
        &self,
        owner: &ObjectId,
        request: PublishVideoRequest,
        video_file: Option<UploadedFile>,
        thumbnail: Option<UploadedFile>,
    ) -> Result<VideoResponse, AppError> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let video_file = video_file
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::ValidationError("Video file is required".to_string()))?;
        let thumbnail = thumbnail
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::ValidationError("Thumbnail is required".to_string()))?;

        let video_file = self.media.upload(video_file).await?;
        let thumbnail = self.media.upload(thumbnail).await?;

        let video = Video::new(*owner, &request.title, &request.description, video_file, thumbnail);
        let created = self.videos.create(video).await?;

        log::info!("동영상 업로드: {} by {}", created.id, owner);
        self.respond(&created).await
    }

    /// 동영상 조회
    ///
    /// 조회수를 1 올리고, 로그인한 시청자면 시청 기록에 추가합니다.
    pub async fn get_by_id(&self, raw_id: &str, viewer: Option<&ObjectId>) -> Result<VideoResponse, AppError> {
        let id = parse_object_id(raw_id, "video")?;
        let video = require_found(self.videos.find_by_id(&id).await?, "video")?;

        if !video.is_visible_to(viewer) {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        let video = require_found(self.videos.increment_views(&id).await?, "video")?;
        if let Some(viewer) = viewer {
            self.users.push_watch_history(viewer, &id).await?;
        }

        self.respond(&video).await
    }

    /// 제목/설명/썸네일 수정 (소유자 전용)
    pub async fn update(
        &self,
        actor: &ObjectId,
        raw_id: &str,
        request: UpdateVideoRequest,
        thumbnail: Option<UploadedFile>,
    ) -> Result<VideoResponse, AppError> {
        let id = parse_object_id(raw_id, "video")?;
        let video = require_found(self.videos.find_by_id(&id).await?, "video")?;
        ensure_owner(&video, actor, "video")?;

        let thumbnail = thumbnail.filter(|f| !f.is_empty());
        if request.is_empty() && thumbnail.is_none() {
            return Err(AppError::ValidationError(
                "At least one field (title, description or thumbnail) is required".to_string(),
            ));
        }
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let new_thumbnail = match thumbnail {
            Some(file) => Some(self.media.upload(file).await?),
            None => None,
        };
        let replaced = new_thumbnail.is_some();

        let update = VideoUpdate {
            title: request.title.map(|t| t.trim().to_string()),
            description: request.description.map(|d| d.trim().to_string()),
            thumbnail: new_thumbnail,
        };
        let updated = require_found(self.videos.update(&id, update).await?, "video")?;

        if replaced {
            self.discard(&video.thumbnail).await;
        }

        self.respond(&updated).await
    }

    /// 동영상 삭제 (소유자 전용). 호스팅된 파일도 함께 삭제합니다.
    pub async fn delete(&self, actor: &ObjectId, raw_id: &str) -> Result<(), AppError> {
        let id = parse_object_id(raw_id, "video")?;
        let video = require_found(self.videos.find_by_id(&id).await?, "video")?;
        ensure_owner(&video, actor, "video")?;

        if !self.videos.delete(&id).await? {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        self.discard(&video.video_file).await;
        self.discard(&video.thumbnail).await;

        log::info!("동영상 삭제: {} by {}", id, actor);
        Ok(())
    }

    /// 공개/비공개 전환 (소유자 전용)
    pub async fn toggle_publish(&self, actor: &ObjectId, raw_id: &str) -> Result<VideoResponse, AppError> {
        let id = parse_object_id(raw_id, "video")?;
        let video = require_found(self.videos.find_by_id(&id).await?, "video")?;
        ensure_owner(&video, actor, "video")?;

        let updated = require_found(self.videos.toggle_published(&id).await?, "video")?;

        self.respond(&updated).await
    }

    /// 소유자의 모든 동영상 (대시보드용, 비공개 포함)
    pub async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<VideoResponse>, AppError> {
        let videos = self.videos.list_by_owner(owner).await?;
        self.respond_all(&videos).await
    }

    async fn respond(&self, video: &Video) -> Result<VideoResponse, AppError> {
        let owner = self.users
            .find_by_id(&video.owner)
            .await?
            .map(|user| OwnerSummary::from(&user))
            .unwrap_or_else(|| OwnerSummary::unknown(video.owner.to_hex()));

        Ok(VideoResponse::new(video, owner))
    }

    async fn respond_all(&self, videos: &[Video]) -> Result<Vec<VideoResponse>, AppError> {
        let owners: Vec<ObjectId> = videos.iter().map(|v| v.owner).collect();
        let summaries = owner_summaries(&self.users, &owners).await?;

        Ok(videos
            .iter()
            .map(|video| {
                let owner = summaries
                    .get(&video.owner)
                    .cloned()
                    .unwrap_or_else(|| OwnerSummary::unknown(video.owner.to_hex()));
                VideoResponse::new(video, owner)
            })
            .collect())
    }

    async fn discard(&self, asset: &MediaAsset) {
        if let Err(e) = self.media.delete(asset).await {
            log::warn!("미디어 삭제 실패 ({}): {}", asset.public_id, e);
        }
    }
}

/// `sortBy`/`sortType` 쿼리 해석
fn parse_sort(sort_by: Option<&str>, sort_type: Option<&str>) -> Result<VideoSort, AppError> {
    let field = match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => VideoSortField::parse(raw)
            .ok_or_else(|| AppError::ValidationError(format!("Invalid sortBy: {}", raw)))?,
        None => VideoSortField::CreatedAt,
    };

    let ascending = match sort_type.map(|s| s.trim().to_lowercase()) {
        None => false,
        Some(s) if s.is_empty() || s == "desc" || s == "-1" => false,
        Some(s) if s == "asc" || s == "1" => true,
        Some(s) => return Err(AppError::ValidationError(format!("Invalid sortType: {}", s))),
    };

    Ok(VideoSort { field, ascending })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::services::media::InMemoryMediaHost;

    fn file(field: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            field_name: field.to_string(),
            file_name: field.to_string(),
            content_type: Some(content_type.to_string()),
            bytes: vec![0; 16],
        }
    }

    fn publish_request(title: &str) -> PublishVideoRequest {
        PublishVideoRequest {
            title: title.to_string(),
            description: "desc".to_string(),
        }
    }

    async fn setup() -> (VideoService, Repositories, User) {
        let repositories = Repositories::in_memory();
        let service = VideoService::new(&repositories, Arc::new(InMemoryMediaHost::default()));
        let avatar = MediaAsset {
            url: "https://media.example/a.png".to_string(),
            public_id: "a".to_string(),
            resource_type: "image".to_string(),
            duration: None,
        };
        let alice = repositories
            .users
            .create(User::new("alice", "alice@x.com", "Alice", "hash".into(), avatar, None))
            .await
            .unwrap();

        (service, repositories, alice)
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort(None, None).unwrap(), VideoSort::default());
        let sort = parse_sort(Some("views"), Some("asc")).unwrap();
        assert_eq!(sort.field, VideoSortField::Views);
        assert!(sort.ascending);
        assert!(parse_sort(Some("password"), None).is_err());
        assert!(parse_sort(None, Some("sideways")).is_err());
    }

    #[actix_web::test]
    async fn test_publish_requires_both_files() {
        let (service, _, alice) = setup().await;

        let result = service
            .publish(&alice.id, publish_request("Intro"), Some(file("videoFile", "video/mp4")), None)
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_get_by_id_counts_views_and_records_history() {
        let (service, repositories, alice) = setup().await;
        let video = service
            .publish(
                &alice.id,
                publish_request("Intro"),
                Some(file("videoFile", "video/mp4")),
                Some(file("thumbnail", "image/png")),
            )
            .await
            .unwrap();

        let fetched = service.get_by_id(&video.id, Some(&alice.id)).await.unwrap();
        assert_eq!(fetched.views, 1);
        assert_eq!(fetched.owner.username, "alice");

        let stored = repositories.users.find_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored.watch_history.len(), 1);
    }

    #[actix_web::test]
    async fn test_unpublished_video_is_hidden_from_others() {
        let (service, _, alice) = setup().await;
        let video = service
            .publish(
                &alice.id,
                publish_request("Draft"),
                Some(file("videoFile", "video/mp4")),
                Some(file("thumbnail", "image/png")),
            )
            .await
            .unwrap();

        let toggled = service.toggle_publish(&alice.id, &video.id).await.unwrap();
        assert!(!toggled.is_published);

        let stranger = ObjectId::new();
        let result = service.get_by_id(&video.id, Some(&stranger)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        assert!(service.get_by_id(&video.id, Some(&alice.id)).await.is_ok());
    }

    #[actix_web::test]
    async fn test_only_owner_can_delete() {
        let (service, _, alice) = setup().await;
        let video = service
            .publish(
                &alice.id,
                publish_request("Mine"),
                Some(file("videoFile", "video/mp4")),
                Some(file("thumbnail", "image/png")),
            )
            .await
            .unwrap();

        let result = service.delete(&ObjectId::new(), &video.id).await;
        assert!(matches!(result, Err(AppError::AuthorizationError(_))));

        service.delete(&alice.id, &video.id).await.unwrap();
        let gone = service.get_by_id(&video.id, None).await;
        assert!(matches!(gone, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_concurrent_publish_toggles_each_flip_once() {
        let (service, repositories, alice) = setup().await;
        let video = service
            .publish(
                &alice.id,
                publish_request("Flip"),
                Some(file("videoFile", "video/mp4")),
                Some(file("thumbnail", "image/png")),
            )
            .await
            .unwrap();

        let (first, second) = futures_util::join!(
            service.toggle_publish(&alice.id, &video.id),
            service.toggle_publish(&alice.id, &video.id),
        );
        let (first, second) = (first.unwrap(), second.unwrap());
        assert_ne!(first.is_published, second.is_published);

        let id = ObjectId::parse_str(&video.id).unwrap();
        let stored = repositories.videos.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.is_published);
    }
}
