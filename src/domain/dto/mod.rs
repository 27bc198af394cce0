//! # Data Transfer Objects Module
//!
//! HTTP 경계의 요청/응답 계약입니다. 응답 필드는 모두 camelCase로 직렬화되며,
//! 성공 응답은 `ApiResponse` 봉투(`statusCode`, `data`, `message`)에 담깁니다.
//!
//! ```text
//! dto/
//! ├── api_response.rs   # 성공 응답 봉투
//! ├── pagination.rs     # page/limit 쿼리
//! ├── users/            # 회원가입, 로그인, 프로필
//! ├── videos.rs
//! ├── tweets.rs
//! ├── comments.rs
//! ├── playlists.rs
//! └── relations.rs      # 토글 결과, 채널 통계
//! ```

pub mod api_response;
pub mod comments;
pub mod pagination;
pub mod playlists;
pub mod relations;
pub mod tweets;
pub mod users;
pub mod videos;

pub use api_response::ApiResponse;
pub use comments::*;
pub use pagination::*;
pub use playlists::*;
pub use relations::*;
pub use tweets::*;
pub use users::*;
pub use videos::*;

use mongodb::bson::DateTime;

/// BSON 시각을 RFC 3339 문자열로 변환
pub(crate) fn rfc3339(value: &DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}
