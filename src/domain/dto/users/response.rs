//! 사용자 응답 DTO
//!
//! 비밀번호 해시와 리프레시 토큰은 어떤 응답에도 포함되지 않습니다.
use serde::{Deserialize, Serialize};

use crate::domain::dto::rfc3339;
use crate::domain::entities::User;
use crate::domain::models::TokenPair;

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.url.clone(),
            cover_image: user.cover_image.as_ref().map(|c| c.url.clone()),
            created_at: rfc3339(&user.created_at),
            updated_at: rfc3339(&user.updated_at),
        }
    }
}

/// 콘텐츠 작성자 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.url.clone(),
        }
    }
}

impl OwnerSummary {
    /// 작성자 레코드를 찾지 못했을 때 ID만 채운 요약
    pub fn unknown(id: String) -> Self {
        Self {
            id,
            username: String::new(),
            full_name: String::new(),
            avatar: String::new(),
        }
    }
}

/// 로그인 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginResponse {
    pub fn new(user: &User, tokens: &TokenPair) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
        }
    }
}

/// 채널 공개 프로필
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfileResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub subscribers_count: u64,
    pub channels_subscribed_to_count: u64,
    pub is_subscribed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MediaAsset;

    #[test]
    fn test_user_response_is_sanitized() {
        let mut user = User::new(
            "alice",
            "alice@x.com",
            "Alice",
            "$2b$04$hash".to_string(),
            MediaAsset {
                url: "https://media.example/a.png".to_string(),
                public_id: "a".to_string(),
                resource_type: "image".to_string(),
                duration: None,
            },
            None,
        );
        user.refresh_token = Some("refresh".to_string());

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["avatar"], "https://media.example/a.png");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refreshToken").is_none());
    }
}
