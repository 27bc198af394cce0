//! 도메인 계층
//!
//! ```text
//! domain/
//! ├── entities/   # MongoDB 문서 (User, Video, Tweet, Comment, Playlist, Edge)
//! ├── dto/        # HTTP 요청/응답 계약
//! └── models/     # 인증 컨텍스트, 토큰 클레임
//! ```

pub mod dto;
pub mod entities;
pub mod models;

pub use entities::*;
pub use models::*;
