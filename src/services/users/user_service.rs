//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 로그인, 계정/프로필 관리, 채널 프로필과 시청 기록 조회를 담당합니다.
//!
//! ## 회원가입 절차
//!
//! 각 단계가 다음 단계의 전제 조건입니다.
//!
//! ```text
//! 입력 검증 (400) → 사용자명/이메일 중복 확인 (409) → 아바타 필수 (400)
//!   → 아바타/커버 업로드 (500) → 비밀번호 해싱 → 사용자 저장 (409) → 응답 (201)
//! ```
//!
//! 업로드 이후 단계가 실패하면 업로드된 이미지는 호스트에 남습니다.

use std::sync::Arc;

use bcrypt::{hash, verify};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::{
    ChangePasswordRequest, ChannelProfileResponse, LoginRequest, RegisterUserRequest,
    UpdateAccountRequest, UserResponse, VideoResponse,
};
use crate::domain::entities::{EdgeKind, MediaAsset, User, normalize_handle};
use crate::domain::models::TokenPair;
use crate::repositories::{EdgeRepository, ProfileUpdate, Repositories, UserRepository, VideoRepository};
use crate::services::auth::TokenService;
use crate::services::media::{MediaHost, UploadedFile};
use crate::services::ownership::owner_summaries;

/// 사용자 관리 비즈니스 로직 서비스
pub struct UserService {
    users: Arc<dyn UserRepository>,
    videos: Arc<dyn VideoRepository>,
    edges: Arc<dyn EdgeRepository>,
    tokens: Arc<TokenService>,
    media: Arc<dyn MediaHost>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        repositories: &Repositories,
        tokens: Arc<TokenService>,
        media: Arc<dyn MediaHost>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users: repositories.users.clone(),
            videos: repositories.videos.clone(),
            edges: repositories.edges.clone(),
            tokens,
            media,
            bcrypt_cost,
        }
    }

    /// 회원가입
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 필수 필드 누락, 형식 오류, 아바타 없음
    /// * `AppError::ConflictError` - 사용자명 또는 이메일 중복
    /// * `AppError::ExternalServiceError` - 이미지 업로드 실패
    pub async fn register(
        &self,
        request: RegisterUserRequest,
        avatar: Option<UploadedFile>,
        cover_image: Option<UploadedFile>,
    ) -> Result<UserResponse, AppError> {
        let request = RegisterUserRequest {
            username: normalize_handle(&request.username),
            email: normalize_handle(&request.email),
            full_name: request.full_name.trim().to_string(),
            password: request.password,
        };
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if self.users.find_by_username(&request.username).await?.is_some()
            || self.users.find_by_email(&request.email).await?.is_some()
        {
            return Err(AppError::ConflictError(
                "User with email or username already exists".to_string(),
            ));
        }

        let avatar = avatar
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::ValidationError("Avatar file is required".to_string()))?;

        let avatar = self.media.upload(avatar).await?;
        let cover_image = match cover_image.filter(|f| !f.is_empty()) {
            Some(file) => Some(self.media.upload(file).await?),
            None => None,
        };

        let password_hash = self.hash_password(&request.password)?;

        let user = User::new(
            &request.username,
            &request.email,
            &request.full_name,
            password_hash,
            avatar,
            cover_image,
        );
        let created = self.users.create(user).await?;

        log::info!("회원가입 완료: {} ({})", created.username, created.id);
        Ok(UserResponse::from(created))
    }

    /// 로그인 (이메일 또는 사용자명)
    ///
    /// 성공하면 새 토큰 쌍을 발급하며, 이전 리프레시 토큰은 무효가 됩니다.
    pub async fn login(&self, request: LoginRequest) -> Result<(User, TokenPair), AppError> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let email = request.email.as_deref().map(normalize_handle).filter(|e| !e.is_empty());
        let user = match email {
            Some(email) => self.users.find_by_email(&email).await?,
            None => {
                let username = request.username.as_deref().map(normalize_handle).unwrap_or_default();
                self.users.find_by_username(&username).await?
            }
        };
        let user = user.ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        if !self.verify_password(&request.password, &user.password_hash)? {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", user.username);
            return Err(AppError::AuthenticationError("Invalid user credentials".to_string()));
        }

        let tokens = self.tokens.issue(&user).await?;
        log::info!("로그인: {}", user.username);

        Ok((user, tokens))
    }

    /// 로그아웃 (저장된 리프레시 토큰 제거)
    pub async fn logout(&self, user_id: &ObjectId) -> Result<(), AppError> {
        self.tokens.revoke(user_id).await
    }

    pub async fn current_user(&self, user_id: &ObjectId) -> Result<UserResponse, AppError> {
        self.load(user_id).await.map(UserResponse::from)
    }

    /// 비밀번호 변경
    ///
    /// 기존 비밀번호가 맞지 않으면 400을 반환합니다.
    pub async fn change_password(&self, user_id: &ObjectId, request: ChangePasswordRequest) -> Result<(), AppError> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let user = self.load(user_id).await?;
        if !self.verify_password(&request.old_password, &user.password_hash)? {
            return Err(AppError::ValidationError("Invalid old password".to_string()));
        }

        let password_hash = self.hash_password(&request.new_password)?;
        if !self.users.set_password_hash(user_id, &password_hash).await? {
            return Err(AppError::NotFound("User does not exist".to_string()));
        }

        Ok(())
    }

    /// 이름/이메일 수정
    pub async fn update_account(&self, user_id: &ObjectId, request: UpdateAccountRequest) -> Result<UserResponse, AppError> {
        let request = UpdateAccountRequest {
            full_name: request.full_name.map(|n| n.trim().to_string()),
            email: request.email.map(|e| normalize_handle(&e)),
        };
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let update = ProfileUpdate {
            full_name: request.full_name,
            email: request.email,
        };

        self.users
            .update_profile(user_id, update)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))
    }

    /// 아바타 교체. 이전 이미지 삭제 실패는 기록만 합니다.
    pub async fn update_avatar(&self, user_id: &ObjectId, file: Option<UploadedFile>) -> Result<UserResponse, AppError> {
        let file = file
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::ValidationError("Avatar file is missing".to_string()))?;

        let previous = self.load(user_id).await?.avatar;
        let avatar = self.media.upload(file).await?;

        let updated = self.users
            .set_avatar(user_id, avatar)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        self.discard(&previous).await;
        Ok(UserResponse::from(updated))
    }

    /// 커버 이미지 교체
    pub async fn update_cover_image(&self, user_id: &ObjectId, file: Option<UploadedFile>) -> Result<UserResponse, AppError> {
        let file = file
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::ValidationError("Cover image file is missing".to_string()))?;

        let previous = self.load(user_id).await?.cover_image;
        let cover = self.media.upload(file).await?;

        let updated = self.users
            .set_cover_image(user_id, cover)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        if let Some(previous) = previous {
            self.discard(&previous).await;
        }
        Ok(UserResponse::from(updated))
    }

    /// 채널 공개 프로필 (구독자 수, 구독 채널 수, 시청자의 구독 여부)
    pub async fn channel_profile(&self, username: &str, viewer: Option<&ObjectId>) -> Result<ChannelProfileResponse, AppError> {
        let username = normalize_handle(username);
        if username.is_empty() {
            return Err(AppError::ValidationError("Username is missing".to_string()));
        }

        let channel = self.users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel does not exist".to_string()))?;

        let subscribers_count = self.edges.count_by_target(&channel.id, EdgeKind::Subscription).await?;
        let channels_subscribed_to_count = self.edges.count_by_actor(&channel.id, EdgeKind::Subscription).await?;
        let is_subscribed = match viewer {
            Some(viewer) => self.edges
                .find(viewer, &channel.id, EdgeKind::Subscription)
                .await?
                .is_some(),
            None => false,
        };

        Ok(ChannelProfileResponse {
            id: channel.id.to_hex(),
            username: channel.username,
            full_name: channel.full_name,
            avatar: channel.avatar.url,
            cover_image: channel.cover_image.map(|c| c.url),
            subscribers_count,
            channels_subscribed_to_count,
            is_subscribed,
        })
    }

    /// 시청 기록 (최근 시청 순, 삭제된 동영상은 제외)
    pub async fn watch_history(&self, user_id: &ObjectId) -> Result<Vec<VideoResponse>, AppError> {
        let user = self.load(user_id).await?;

        let videos = self.videos.find_by_ids(&user.watch_history).await?;
        let owners: Vec<ObjectId> = videos.iter().map(|v| v.owner).collect();
        let summaries = owner_summaries(&self.users, &owners).await?;

        let mut ordered = Vec::with_capacity(videos.len());
        for id in &user.watch_history {
            if let Some(video) = videos.iter().find(|v| &v.id == id) {
                if let Some(owner) = summaries.get(&video.owner) {
                    ordered.push(VideoResponse::new(video, owner.clone()));
                }
            }
        }

        Ok(ordered)
    }

    async fn load(&self, user_id: &ObjectId) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))
    }

    async fn discard(&self, asset: &MediaAsset) {
        if let Err(e) = self.media.delete(asset).await {
            log::warn!("이전 미디어 삭제 실패 ({}): {}", asset.public_id, e);
        }
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.bcrypt_cost).context("비밀번호 해싱 실패")
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        verify(password, password_hash).context("비밀번호 검증 실패")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::services::media::InMemoryMediaHost;

    fn image(field: &str) -> UploadedFile {
        UploadedFile {
            field_name: field.to_string(),
            file_name: format!("{}.png", field),
            content_type: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
        }
    }

    fn request(username: &str, email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            full_name: "Alice".to_string(),
            password: "Password123".to_string(),
        }
    }

    fn service_with(media: Arc<InMemoryMediaHost>) -> UserService {
        let repositories = Repositories::in_memory();
        let tokens = Arc::new(TokenService::new(repositories.users.clone(), JwtConfig::development()));
        UserService::new(&repositories, tokens, media, 4)
    }

    #[actix_web::test]
    async fn test_register_rejects_duplicate_handle_case_insensitively() {
        let service = service_with(Arc::new(InMemoryMediaHost::default()));

        service.register(request("alice", "alice@x.com"), Some(image("avatar")), None).await.unwrap();
        let result = service
            .register(request("ALICE", "other@x.com"), Some(image("avatar")), None)
            .await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_register_requires_avatar_before_uploading() {
        let media = Arc::new(InMemoryMediaHost::default());
        let service = service_with(media.clone());

        let result = service.register(request("alice", "alice@x.com"), None, Some(image("cover"))).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(media.stored_count(), 0);
    }

    #[actix_web::test]
    async fn test_register_fails_when_media_host_fails() {
        let media = Arc::new(InMemoryMediaHost::default());
        media.set_failing(true);
        let service = service_with(media);

        let result = service.register(request("alice", "alice@x.com"), Some(image("avatar")), None).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_login_and_change_password() {
        let service = service_with(Arc::new(InMemoryMediaHost::default()));
        service.register(request("alice", "alice@x.com"), Some(image("avatar")), None).await.unwrap();

        let login = |password: &str| LoginRequest {
            email: Some("Alice@X.com".to_string()),
            username: None,
            password: password.to_string(),
        };

        let wrong = service.login(login("nope")).await;
        assert!(matches!(wrong, Err(AppError::AuthenticationError(_))));

        let (user, _) = service.login(login("Password123")).await.unwrap();

        let bad_old = ChangePasswordRequest {
            old_password: "nope".to_string(),
            new_password: "NewPassword1".to_string(),
        };
        assert!(matches!(
            service.change_password(&user.id, bad_old).await,
            Err(AppError::ValidationError(_))
        ));

        let change = ChangePasswordRequest {
            old_password: "Password123".to_string(),
            new_password: "NewPassword1".to_string(),
        };
        service.change_password(&user.id, change).await.unwrap();
        assert!(service.login(login("NewPassword1")).await.is_ok());
    }

    #[actix_web::test]
    async fn test_update_avatar_discards_previous_image() {
        let media = Arc::new(InMemoryMediaHost::default());
        let service = service_with(media.clone());
        let alice = service.register(request("alice", "alice@x.com"), Some(image("avatar")), None).await.unwrap();
        let alice_id = ObjectId::parse_str(&alice.id).unwrap();

        let updated = service.update_avatar(&alice_id, Some(image("avatar"))).await.unwrap();

        assert_ne!(updated.avatar, alice.avatar);
        assert_eq!(media.stored_count(), 1);
    }
}
