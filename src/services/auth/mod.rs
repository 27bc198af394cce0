//! 인증 서비스 모듈
//!
//! JWT 액세스/리프레시 토큰의 발급, 검증, 회전, 폐기를 담당합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명 (액세스/리프레시 토큰은 서로 다른 시크릿)
//! - 사용자당 리프레시 토큰 하나만 유효 (회전 시 이전 토큰 무효화)
//! - 토큰마다 고유 `jti`

pub mod token_service;

pub use token_service::*;
