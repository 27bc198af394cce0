//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 핸들러는 요청을 추출하고
//! `AppState`의 서비스를 호출한 뒤 결과를 `ApiResponse` 봉투로 감쌉니다.
//! 실패는 모두 `AppError`로 반환되어 `{ statusCode, message }` 형태로 변환됩니다.
//!
//! ```text
//! Client ── HTTP ──▶ Handlers (이 모듈) ──▶ Services ──▶ Repositories ──▶ MongoDB
//!                                                   └──▶ MediaHost (Cloudinary)
//! ```
//!
//! ## 인증 정보 사용
//!
//! 인증 미들웨어가 확인한 사용자는 추출자로 받습니다.
//!
//! - `AuthenticatedUser`: 인증이 없으면 401
//! - `OptionalUser`: 익명 요청도 허용
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_tweet(
//!     state: web::Data<AppState>,
//!     user: AuthenticatedUser,
//!     payload: web::Json<TweetRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let tweet = state.tweets.create(user.id(), payload.into_inner()).await?;
//!     Ok(ApiResponse::created(tweet, "Tweet created successfully").into_response())
//! }
//! ```

pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod healthcheck;
pub mod likes;
pub mod multipart;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;
