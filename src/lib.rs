//! StreamHub 백엔드
//!
//! 동영상 공유 소셜 서비스의 REST API입니다. 사용자 인증, 동영상 업로드와 조회,
//! 트윗, 댓글, 좋아요, 구독, 재생목록, 채널 대시보드를 제공합니다.
//!
//! # Features
//!
//! - **JWT 인증**: 액세스/리프레시 토큰, 리프레시 토큰 회전과 재사용 차단
//! - **미디어 업로드**: multipart 파일을 Cloudinary에 업로드
//! - **관계 토글**: 좋아요/구독을 유니크 인덱스 기반으로 중복 없이 토글
//! - **저장소 포트**: MongoDB 구현과 메모리 구현을 같은 trait 뒤에 둠
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1 scope, 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 추출/응답 봉투
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 소유권 검사, 토큰 회전, 토글
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← trait 포트 (Mongo / InMemory)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Media │ ← 저장소, Cloudinary
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use streamhub_backend::config::AppConfig;
//! use streamhub_backend::core::state::AppState;
//! use streamhub_backend::repositories::Repositories;
//! use streamhub_backend::services::media::InMemoryMediaHost;
//!
//! let state = AppState::new(
//!     AppConfig::development(),
//!     Repositories::in_memory(),
//!     Arc::new(InMemoryMediaHost::default()),
//! );
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;
