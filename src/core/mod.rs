//! # Core Module
//!
//! 애플리케이션 전역에서 공유하는 기반 타입입니다.
//!
//! - [`errors`]: `AppError`와 HTTP 실패 응답 변환
//! - [`state`]: 서비스와 설정을 묶은 `AppState`
//!
//! 서비스는 생성자로 의존성(`Arc<dyn ...Repository>`, `Arc<TokenService>` 등)을
//! 받으며, `main`에서 한 번 조립된 `AppState`가 `web::Data`로 핸들러에 전달됩니다.

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::*;
