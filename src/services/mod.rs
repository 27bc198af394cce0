//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 생성자로 저장소 포트(`Arc<dyn ...Repository>`)와 협력자를 받으며,
//! `core::state::AppState`가 시작 시 한 번 조립합니다.
//!
//! ```text
//! services/
//! ├── auth/          # 토큰 발급/검증/회전/폐기
//! ├── users/         # 회원가입, 로그인, 계정, 채널 프로필
//! ├── videos/
//! ├── tweets/
//! ├── comments/
//! ├── playlists/
//! ├── relations/     # 좋아요/구독 토글
//! ├── dashboard/     # 채널 통계
//! ├── media/         # 외부 미디어 호스트
//! └── ownership.rs   # 소유자 범위 변경 공통 절차
//! ```

pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod media;
pub mod ownership;
pub mod playlists;
pub mod relations;
pub mod tweets;
pub mod users;
pub mod videos;
