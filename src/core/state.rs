//! # Application State
//!
//! 시작 시 한 번 조립되어 모든 워커가 공유하는 읽기 전용 상태입니다.
//! 설정, 저장소, 서비스를 `Arc`로 묶어 `web::Data<AppState>`로 주입합니다.
//!
//! ```rust,ignore
//! let state = AppState::new(config, Repositories::in_memory(), Arc::new(InMemoryMediaHost::default()));
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(state.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

use std::sync::Arc;

use crate::config::AppConfig;
use crate::repositories::Repositories;
use crate::services::auth::TokenService;
use crate::services::comments::CommentService;
use crate::services::dashboard::DashboardService;
use crate::services::media::MediaHost;
use crate::services::playlists::PlaylistService;
use crate::services::relations::EdgeService;
use crate::services::tweets::TweetService;
use crate::services::users::UserService;
use crate::services::videos::VideoService;

/// 프로세스 전역 상태
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<UserService>,
    pub videos: Arc<VideoService>,
    pub tweets: Arc<TweetService>,
    pub comments: Arc<CommentService>,
    pub playlists: Arc<PlaylistService>,
    pub edges: Arc<EdgeService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    /// 저장소와 미디어 호스트를 받아 모든 서비스를 조립합니다
    pub fn new(config: AppConfig, repositories: Repositories, media: Arc<dyn MediaHost>) -> Self {
        let config = Arc::new(config);

        let tokens = Arc::new(TokenService::new(
            repositories.users.clone(),
            config.jwt.clone(),
        ));

        let users = Arc::new(UserService::new(
            &repositories,
            tokens.clone(),
            media.clone(),
            config.bcrypt_cost,
        ));

        Self {
            videos: Arc::new(VideoService::new(&repositories, media)),
            tweets: Arc::new(TweetService::new(&repositories)),
            comments: Arc::new(CommentService::new(&repositories)),
            playlists: Arc::new(PlaylistService::new(&repositories)),
            edges: Arc::new(EdgeService::new(&repositories)),
            dashboard: Arc::new(DashboardService::new(&repositories)),
            config,
            tokens,
            users,
        }
    }
}
