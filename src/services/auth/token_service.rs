//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 발급, 검증, 회전(rotation), 폐기를 담당합니다.
//!
//! 사용자마다 가장 최근에 발급된 리프레시 토큰 하나만 저장합니다. 갱신 요청에
//! 제시된 토큰이 저장된 값과 다르면 이미 회전되었거나 폐기된 토큰이므로 거부합니다.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mongodb::bson::oid::ObjectId;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::User;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenType};
use crate::repositories::UserRepository;

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하며, 토큰 종류마다 다른 시크릿으로 서명합니다.
pub struct TokenService {
    users: Arc<dyn UserRepository>,
    config: JwtConfig,
}

impl TokenService {
    pub fn new(users: Arc<dyn UserRepository>, config: JwtConfig) -> Self {
        Self { users, config }
    }

    /// 토큰 쌍 발급
    ///
    /// 새 리프레시 토큰을 사용자 문서에 저장하므로 이전 리프레시 토큰은 즉시 무효가 됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    /// * `AppError::NotFound` - 사용자가 더 이상 존재하지 않음
    pub async fn issue(&self, user: &User) -> Result<TokenPair, AppError> {
        let pair = self.sign_pair(&user.id)?;

        let stored = self.users
            .set_refresh_token(&user.id, Some(&pair.refresh_token))
            .await?;
        if !stored {
            return Err(AppError::NotFound("User does not exist".to_string()));
        }

        log::debug!("토큰 발급: user={}", user.id);
        Ok(pair)
    }

    /// 액세스 토큰을 검증하고 주체 사용자를 조회합니다
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 형식 오류, 만료, 서명 불일치, 토큰 종류 불일치
    /// * `AppError::NotFound` - 토큰의 사용자가 삭제됨
    pub async fn verify_access(&self, token: &str) -> Result<User, AppError> {
        let claims = self.verify_token(token, TokenType::Access)?;
        let user_id = subject_id(&claims)?;

        self.users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다
    ///
    /// 저장된 토큰과 정확히 일치할 때만 교체하며, 교체는 기존 값을 조건으로 하는
    /// 원자적 갱신입니다. 같은 토큰으로 동시에 들어온 두 요청 중 하나만 성공합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰이 없거나 유효하지 않음, 재사용된 토큰
    pub async fn refresh(&self, presented: Option<&str>) -> Result<(User, TokenPair), AppError> {
        let presented = presented
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Unauthorized request".to_string()))?;

        let claims = self.verify_token(presented, TokenType::Refresh)?;
        let user_id = subject_id(&claims)?;

        let user = self.users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("Invalid refresh token".to_string()))?;

        if user.refresh_token.as_deref() != Some(presented) {
            log::warn!("만료되었거나 이미 사용된 리프레시 토큰: user={}", user.id);
            return Err(AppError::AuthenticationError(
                "Refresh token is expired or used".to_string(),
            ));
        }

        let pair = self.sign_pair(&user.id)?;
        let rotated = self.users
            .replace_refresh_token(&user.id, presented, &pair.refresh_token)
            .await?;
        if !rotated {
            return Err(AppError::AuthenticationError(
                "Refresh token is expired or used".to_string(),
            ));
        }

        Ok((user, pair))
    }

    /// 저장된 리프레시 토큰을 제거하여 세션을 종료합니다
    pub async fn revoke(&self, user_id: &ObjectId) -> Result<(), AppError> {
        self.users.set_refresh_token(user_id, None).await?;
        log::debug!("리프레시 토큰 폐기: user={}", user_id);
        Ok(())
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 서명, 만료, 토큰 종류를 모두 확인합니다.
    pub fn verify_token(&self, token: &str, expected: TokenType) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret(expected).as_bytes());
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token has expired".to_string())
                }
                _ => AppError::AuthenticationError(format!("Invalid {} token", expected.as_str())),
            })?;

        if claims.token_type != expected {
            return Err(AppError::AuthenticationError("Invalid token type".to_string()));
        }

        Ok(claims)
    }

    /// "Bearer {token}" 형식의 Authorization 헤더에서 토큰만 추출
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Invalid authorization header".to_string()))
    }

    fn sign_pair(&self, user_id: &ObjectId) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.sign(user_id, TokenType::Access)?,
            refresh_token: self.sign(user_id, TokenType::Refresh)?,
            expires_in: self.config.access_ttl.num_seconds(),
        })
    }

    fn sign(&self, user_id: &ObjectId, token_type: TokenType) -> AppResult<String> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.config.access_ttl,
            TokenType::Refresh => self.config.refresh_ttl,
        };

        let claims = TokenClaims {
            sub: user_id.to_hex(),
            token_type,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret(token_type).as_bytes());

        encode(&Header::default(), &claims, &encoding_key).context("JWT 토큰 생성 실패")
    }

    fn secret(&self, token_type: TokenType) -> &str {
        match token_type {
            TokenType::Access => &self.config.access_secret,
            TokenType::Refresh => &self.config.refresh_secret,
        }
    }
}

fn subject_id(claims: &TokenClaims) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Invalid token subject".to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Duration;

    use super::*;
    use crate::domain::entities::MediaAsset;
    use crate::repositories::ProfileUpdate;
    use crate::repositories::memory::InMemoryUserRepository;

    /// 조회 직후 다른 요청이 리프레시 토큰을 먼저 교체하는 저장소
    ///
    /// 조회된 사용자는 이전 토큰을 그대로 들고 있으므로 저장값 비교는 통과하고,
    /// 교체 단계의 조건부 갱신에서만 충돌이 드러납니다.
    #[derive(Default)]
    struct RacingUsers {
        inner: InMemoryUserRepository,
        rotate_after_read: Mutex<Option<String>>,
    }

    #[async_trait]
    impl UserRepository for RacingUsers {
        async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
            let found = self.inner.find_by_id(id).await?;
            let winner = self.rotate_after_read.lock().unwrap().take();
            if let Some(token) = winner {
                self.inner.set_refresh_token(id, Some(&token)).await?;
            }
            Ok(found)
        }

        async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
            self.inner.find_by_ids(ids).await
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
            self.inner.find_by_email(email).await
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
            self.inner.find_by_username(username).await
        }

        async fn create(&self, user: User) -> Result<User, AppError> {
            self.inner.create(user).await
        }

        async fn update_profile(&self, id: &ObjectId, update: ProfileUpdate) -> Result<Option<User>, AppError> {
            self.inner.update_profile(id, update).await
        }

        async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
            self.inner.set_password_hash(id, password_hash).await
        }

        async fn set_avatar(&self, id: &ObjectId, avatar: MediaAsset) -> Result<Option<User>, AppError> {
            self.inner.set_avatar(id, avatar).await
        }

        async fn set_cover_image(&self, id: &ObjectId, cover: MediaAsset) -> Result<Option<User>, AppError> {
            self.inner.set_cover_image(id, cover).await
        }

        async fn set_refresh_token(&self, id: &ObjectId, token: Option<&str>) -> Result<bool, AppError> {
            self.inner.set_refresh_token(id, token).await
        }

        async fn replace_refresh_token(&self, id: &ObjectId, expected: &str, new: &str) -> Result<bool, AppError> {
            self.inner.replace_refresh_token(id, expected, new).await
        }

        async fn push_watch_history(&self, id: &ObjectId, video: &ObjectId) -> Result<(), AppError> {
            self.inner.push_watch_history(id, video).await
        }
    }

    fn avatar() -> MediaAsset {
        MediaAsset {
            url: "https://media.example/a.png".to_string(),
            public_id: "streamhub/a".to_string(),
            resource_type: "image".to_string(),
            duration: None,
        }
    }

    async fn setup(config: JwtConfig) -> (TokenService, Arc<dyn UserRepository>, User) {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
        let alice = users
            .create(User::new("alice", "alice@x.com", "Alice", "hash".into(), avatar(), None))
            .await
            .unwrap();

        (TokenService::new(users.clone(), config), users, alice)
    }

    #[actix_web::test]
    async fn test_issue_stores_refresh_token_and_verifies_access() {
        let (service, users, alice) = setup(JwtConfig::development()).await;

        let pair = service.issue(&alice).await.unwrap();
        let stored = users.find_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some(pair.refresh_token.as_str()));

        let user = service.verify_access(&pair.access_token).await.unwrap();
        assert_eq!(user.id, alice.id);
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let (service, _, alice) = setup(JwtConfig::development()).await;
        let pair = service.issue(&alice).await.unwrap();

        let result = service.verify_access(&pair.refresh_token).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_expired_access_token_is_rejected() {
        let mut config = JwtConfig::development();
        config.access_ttl = Duration::seconds(-60);
        let (service, _, alice) = setup(config).await;

        let pair = service.issue(&alice).await.unwrap();
        let result = service.verify_access(&pair.access_token).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_rotated_out_refresh_token_is_rejected() {
        let (service, _, alice) = setup(JwtConfig::development()).await;
        let first = service.issue(&alice).await.unwrap();

        let (_, second) = service.refresh(Some(&first.refresh_token)).await.unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);

        let replay = service.refresh(Some(&first.refresh_token)).await;
        assert!(matches!(replay, Err(AppError::AuthenticationError(_))));

        // 새 토큰은 계속 유효
        assert!(service.refresh(Some(&second.refresh_token)).await.is_ok());
    }

    #[actix_web::test]
    async fn test_revoke_invalidates_refresh() {
        let (service, _, alice) = setup(JwtConfig::development()).await;
        let pair = service.issue(&alice).await.unwrap();

        service.revoke(&alice.id).await.unwrap();

        let result = service.refresh(Some(&pair.refresh_token)).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_access_for_deleted_subject_is_not_found() {
        let (service, _, _) = setup(JwtConfig::development()).await;
        let ghost = User::new("ghost", "ghost@x.com", "Ghost", "hash".into(), avatar(), None);

        let token = service.sign(&ghost.id, TokenType::Access).unwrap();
        let result = service.verify_access(&token).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService::new(
            Arc::new(InMemoryUserRepository::default()),
            JwtConfig::development(),
        );

        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }

    #[actix_web::test]
    async fn test_refresh_losing_rotation_race_is_rejected() {
        let racing = Arc::new(RacingUsers::default());
        let users: Arc<dyn UserRepository> = racing.clone();
        let alice = users
            .create(User::new("alice", "alice@x.com", "Alice", "hash".into(), avatar(), None))
            .await
            .unwrap();
        let service = TokenService::new(users.clone(), JwtConfig::development());
        let pair = service.issue(&alice).await.unwrap();

        *racing.rotate_after_read.lock().unwrap() = Some("rotated-by-other-request".to_string());

        let result = service.refresh(Some(&pair.refresh_token)).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));

        // 먼저 교체한 요청의 토큰이 그대로 남아 있어야 함
        let stored = users.find_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("rotated-by-other-request"));
    }
}
