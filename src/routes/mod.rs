//! API 라우트 설정 모듈
//!
//! 모든 엔드포인트는 `/api/v1` 아래에 리소스별 scope로 등록됩니다.
//!
//! # Auth Middleware Usage
//!
//! scope마다 인증 모드를 지정합니다.
//!
//! - 모든 라우트가 로그인을 요구하는 scope(`/likes`, `/dashboard`)는 `AuthMiddleware::required()`
//! - 공개 조회와 소유자 전용 변경이 섞인 scope는 `AuthMiddleware::optional()`로 감싸고,
//!   변경 핸들러가 `AuthenticatedUser` 추출자로 401을 반환합니다
//!
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/likes")
//!         .wrap(AuthMiddleware::required())
//!         .service(handlers::likes::toggle_video_like)
//! );
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .app_data(web::Data::new(state))
//!     .configure(configure_all_routes);
//! ```

use actix_web::web;

use crate::core::errors::{json_error_handler, path_error_handler, query_error_handler};
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// JSON 본문 최대 크기
const JSON_LIMIT_BYTES: usize = 64 * 1024;

/// 모든 라우트를 설정합니다
///
/// 추출자 실패(JSON, 쿼리, 경로)도 `{ statusCode, message }` 400 응답이 되도록
/// 오류 핸들러를 함께 등록합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler));

    cfg.service(
        web::scope("/api/v1")
            .service(handlers::healthcheck::healthcheck)
            .configure(configure_auth_routes)
            .configure(configure_user_routes)
            .configure(configure_video_routes)
            .configure(configure_tweet_routes)
            .configure(configure_comment_routes)
            .configure(configure_like_routes)
            .configure(configure_subscription_routes)
            .configure(configure_playlist_routes)
            .configure(configure_dashboard_routes),
    );
}

/// 인증 라우트
///
/// - `POST /api/v1/auth/register` - 회원가입 (multipart)
/// - `POST /api/v1/auth/login` - 로그인
/// - `GET|POST /api/v1/auth/refresh-token` - 토큰 갱신
/// - `GET|POST /api/v1/auth/logout` - 로그아웃 (인증 필요)
///
/// ```bash
/// curl -X POST http://localhost:8000/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"username":"alice","password":"Password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .wrap(AuthMiddleware::optional())
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_token)
            .service(handlers::auth::logout),
    );
}

/// 사용자 라우트 (채널 프로필만 익명 허용)
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(AuthMiddleware::optional())
            .service(handlers::users::current_user)
            .service(handlers::users::change_password)
            .service(handlers::users::update_account)
            .service(handlers::users::update_avatar)
            .service(handlers::users::update_cover_image)
            .service(handlers::users::channel_profile)
            .service(handlers::users::watch_history),
    );
}

fn configure_video_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/videos")
            .wrap(AuthMiddleware::optional())
            .service(handlers::videos::list_videos)
            .service(handlers::videos::publish_video)
            .service(handlers::videos::toggle_publish)
            .service(handlers::videos::get_video)
            .service(handlers::videos::update_video)
            .service(handlers::videos::delete_video),
    );
}

fn configure_tweet_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tweets")
            .wrap(AuthMiddleware::optional())
            .service(handlers::tweets::create_tweet)
            .service(handlers::tweets::user_tweets)
            .service(handlers::tweets::update_tweet)
            .service(handlers::tweets::delete_tweet),
    );
}

fn configure_comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .wrap(AuthMiddleware::optional())
            .service(handlers::comments::update_comment)
            .service(handlers::comments::delete_comment)
            .service(handlers::comments::video_comments)
            .service(handlers::comments::add_comment),
    );
}

fn configure_like_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/likes")
            .wrap(AuthMiddleware::required())
            .service(handlers::likes::toggle_video_like)
            .service(handlers::likes::toggle_comment_like)
            .service(handlers::likes::toggle_tweet_like)
            .service(handlers::likes::liked_videos),
    );
}

fn configure_subscription_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscriptions")
            .wrap(AuthMiddleware::optional())
            .service(handlers::subscriptions::toggle_subscription)
            .service(handlers::subscriptions::channel_subscribers)
            .service(handlers::subscriptions::subscribed_channels),
    );
}

/// 재생목록 라우트
///
/// `/add/{video_id}/{playlist_id}`처럼 고정 세그먼트로 시작하는 경로를
/// `/{playlist_id}`보다 먼저 등록합니다.
fn configure_playlist_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/playlist")
            .wrap(AuthMiddleware::optional())
            .service(handlers::playlists::create_playlist)
            .service(handlers::playlists::user_playlists)
            .service(handlers::playlists::add_video)
            .service(handlers::playlists::remove_video)
            .service(handlers::playlists::get_playlist)
            .service(handlers::playlists::update_playlist)
            .service(handlers::playlists::delete_playlist),
    );
}

fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .wrap(AuthMiddleware::required())
            .service(handlers::dashboard::channel_stats)
            .service(handlers::dashboard::channel_videos),
    );
}
