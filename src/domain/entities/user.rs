//! User Entity Implementation
//!
//! 채널 소유자이자 콘텐츠 작성자인 사용자 엔티티입니다.
//! 사용자는 삭제되지 않으며, 프로필/비밀번호/이미지 변경으로만 수정됩니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::media::MediaAsset;

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// 사용자명 (소문자, unique)
    pub username: String,
    /// 이메일 (소문자, unique)
    pub email: String,
    /// 표시 이름
    pub full_name: String,
    /// 프로필 이미지 (필수)
    pub avatar: MediaAsset,
    /// 채널 커버 이미지
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaAsset>,
    /// bcrypt 해시
    pub password_hash: String,
    /// 현재 유효한 리프레시 토큰 (로그아웃 상태면 None)
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// 시청 기록 (최근 시청이 앞쪽)
    #[serde(default)]
    pub watch_history: Vec<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 사용자명과 이메일은 소문자로 정규화됩니다.
    pub fn new(
        username: &str,
        email: &str,
        full_name: &str,
        password_hash: String,
        avatar: MediaAsset,
        cover_image: Option<MediaAsset>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: ObjectId::new(),
            username: normalize_handle(username),
            email: normalize_handle(email),
            full_name: full_name.trim().to_string(),
            avatar,
            cover_image,
            password_hash,
            refresh_token: None,
            watch_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// 사용자명/이메일 비교용 정규화
pub fn normalize_handle(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avatar() -> MediaAsset {
        MediaAsset {
            url: "https://media.example/avatar.png".to_string(),
            public_id: "streamhub/avatar".to_string(),
            resource_type: "image".to_string(),
            duration: None,
        }
    }

    #[test]
    fn test_new_user_normalizes_handles() {
        let user = User::new(" Alice ", "Alice@X.com", " Alice Doe ", "hash".into(), avatar(), None);

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@x.com");
        assert_eq!(user.full_name, "Alice Doe");
        assert!(user.refresh_token.is_none());
        assert!(user.watch_history.is_empty());
    }
}
