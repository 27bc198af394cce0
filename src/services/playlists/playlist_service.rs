//! 재생목록 서비스
//!
//! 동영상 추가/제거는 저장소의 조건부 원자적 갱신으로 처리됩니다.
//! 갱신 조건이 맞지 않으면 이미 있는 동영상(추가) 또는 없는 동영상(제거)입니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::{CreatePlaylistRequest, PlaylistResponse, UpdatePlaylistRequest};
use crate::domain::entities::Playlist;
use crate::repositories::{PlaylistRepository, Repositories, UserRepository, VideoRepository};
use crate::services::ownership::{ensure_owner, parse_object_id, require_found};

pub struct PlaylistService {
    playlists: Arc<dyn PlaylistRepository>,
    videos: Arc<dyn VideoRepository>,
    users: Arc<dyn UserRepository>,
}

impl PlaylistService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            playlists: repositories.playlists.clone(),
            videos: repositories.videos.clone(),
            users: repositories.users.clone(),
        }
    }

    pub async fn create(&self, owner: &ObjectId, request: CreatePlaylistRequest) -> Result<PlaylistResponse, AppError> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let playlist = self.playlists
            .create(Playlist::new(*owner, &request.name, &request.description))
            .await?;

        Ok(PlaylistResponse::from(&playlist))
    }

    pub async fn list_by_user(&self, raw_user: &str) -> Result<Vec<PlaylistResponse>, AppError> {
        let user = parse_object_id(raw_user, "user")?;
        require_found(self.users.find_by_id(&user).await?, "user")?;

        let playlists = self.playlists.list_by_owner(&user).await?;
        Ok(playlists.iter().map(PlaylistResponse::from).collect())
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<PlaylistResponse, AppError> {
        let id = parse_object_id(raw_id, "playlist")?;
        let playlist = require_found(self.playlists.find_by_id(&id).await?, "playlist")?;
        Ok(PlaylistResponse::from(&playlist))
    }

    pub async fn update(&self, actor: &ObjectId, raw_id: &str, request: UpdatePlaylistRequest) -> Result<PlaylistResponse, AppError> {
        let id = parse_object_id(raw_id, "playlist")?;
        let playlist = require_found(self.playlists.find_by_id(&id).await?, "playlist")?;
        ensure_owner(&playlist, actor, "playlist")?;

        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let updated = require_found(
            self.playlists
                .update_details(
                    &id,
                    request.name.map(|n| n.trim().to_string()),
                    request.description.map(|d| d.trim().to_string()),
                )
                .await?,
            "playlist",
        )?;

        Ok(PlaylistResponse::from(&updated))
    }

    pub async fn delete(&self, actor: &ObjectId, raw_id: &str) -> Result<(), AppError> {
        let id = parse_object_id(raw_id, "playlist")?;
        let playlist = require_found(self.playlists.find_by_id(&id).await?, "playlist")?;
        ensure_owner(&playlist, actor, "playlist")?;

        if !self.playlists.delete(&id).await? {
            return Err(AppError::NotFound("Playlist not found".to_string()));
        }
        Ok(())
    }

    /// 재생목록에 동영상 추가
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 ID, 이미 담긴 동영상
    /// * `AppError::NotFound` - 재생목록 또는 동영상 없음
    /// * `AppError::AuthorizationError` - 소유자가 아님
    pub async fn add_video(&self, actor: &ObjectId, raw_video: &str, raw_playlist: &str) -> Result<PlaylistResponse, AppError> {
        let (video, playlist) = self.authorize_membership_change(actor, raw_video, raw_playlist).await?;

        match self.playlists.add_video(&playlist, &video).await? {
            Some(updated) => Ok(PlaylistResponse::from(&updated)),
            None => {
                let conflict = "Video already exists in the playlist";
                Err(self.unmatched_membership_change(&playlist, conflict).await)
            }
        }
    }

    /// 재생목록에서 동영상 제거
    pub async fn remove_video(&self, actor: &ObjectId, raw_video: &str, raw_playlist: &str) -> Result<PlaylistResponse, AppError> {
        let (video, playlist) = self.authorize_membership_change(actor, raw_video, raw_playlist).await?;

        match self.playlists.remove_video(&playlist, &video).await? {
            Some(updated) => Ok(PlaylistResponse::from(&updated)),
            None => {
                let conflict = "Video does not exist in the playlist";
                Err(self.unmatched_membership_change(&playlist, conflict).await)
            }
        }
    }

    /// 조건부 갱신이 아무 문서도 바꾸지 못한 이유를 판별
    ///
    /// 소유자 확인 이후 재생목록이 삭제되었으면 404, 남아 있으면 멤버십 조건 위반(400)입니다.
    async fn unmatched_membership_change(&self, playlist: &ObjectId, conflict: &str) -> AppError {
        match self.playlists.find_by_id(playlist).await {
            Ok(Some(_)) => AppError::ValidationError(conflict.to_string()),
            Ok(None) => AppError::NotFound("Playlist not found".to_string()),
            Err(e) => e,
        }
    }

    async fn authorize_membership_change(
        &self,
        actor: &ObjectId,
        raw_video: &str,
        raw_playlist: &str,
    ) -> Result<(ObjectId, ObjectId), AppError> {
        let video = parse_object_id(raw_video, "video")?;
        let playlist_id = parse_object_id(raw_playlist, "playlist")?;

        let playlist = require_found(self.playlists.find_by_id(&playlist_id).await?, "playlist")?;
        ensure_owner(&playlist, actor, "playlist")?;
        require_found(self.videos.find_by_id(&video).await?, "video")?;

        Ok((video, playlist_id))
    }
}
