//! 미들웨어 모듈
//!
//! # 인증 미들웨어 (AuthMiddleware)
//! - `accessToken` 쿠키 또는 `Authorization: Bearer` 헤더의 액세스 토큰 검증
//! - 확인된 사용자를 request extension에 `AuthenticatedUser`로 저장
//! - 필수/선택 인증 모드 지원
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! cfg.service(
//!     web::resource("/users/current-user")
//!         .wrap(AuthMiddleware::required())
//!         .route(web::get().to(current_user)),
//! );
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_inner::ACCESS_TOKEN_COOKIE;
pub use auth_middleware::AuthMiddleware;
