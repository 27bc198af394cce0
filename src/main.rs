//! StreamHub 메인 애플리케이션
//!
//! 설정을 읽고 저장소와 미디어 호스트를 조립한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use streamhub_backend::config::{AppConfig, CorsConfig, StorageBackend};
use streamhub_backend::core::errors::AppError;
use streamhub_backend::core::state::AppState;
use streamhub_backend::db::Database;
use streamhub_backend::repositories::Repositories;
use streamhub_backend::routes::configure_all_routes;
use streamhub_backend::services::media::{CloudinaryClient, InMemoryMediaHost, MediaHost};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 StreamHub 서비스 시작중...");

    let config = AppConfig::from_env().map_err(startup_error)?;

    let repositories = initialize_repositories(&config).await.map_err(startup_error)?;
    let media = initialize_media_host(&config);

    let state = AppState::new(config, repositories, media);
    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> io::Result<()> {
    let config = state.config.clone();
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/api/v1/healthcheck", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        config.rate_limit.per_second,
        config.rate_limit.burst_size
    );

    let cors_config = config.cors.clone();
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&cors_config))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.clone())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(config.server.workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 표준 출력으로 남김
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => println!("Current profile: {} ({} 로드 됨)", profile, file),
        Err(e) => println!("Current profile: {} (env 파일 로드 실패: {})", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 설정된 저장소 백엔드를 초기화합니다
async fn initialize_repositories(config: &AppConfig) -> Result<Repositories, AppError> {
    match config.database.backend {
        StorageBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::new(&config.database).await?;
            Repositories::mongo(&database).await
        }
        StorageBackend::Memory => {
            info!("💾 메모리 저장소 사용 (재시작 시 데이터 유실)");
            Ok(Repositories::in_memory())
        }
    }
}

fn initialize_media_host(config: &AppConfig) -> Arc<dyn MediaHost> {
    match &config.media {
        Some(media) => {
            info!("☁️ Cloudinary 미디어 호스트 사용: {}", media.cloud_name);
            Arc::new(CloudinaryClient::new(media.clone()))
        }
        None => {
            info!("💾 메모리 미디어 호스트 사용");
            Arc::new(InMemoryMediaHost::default())
        }
    }
}

/// CORS 설정을 구성합니다
///
/// 쿠키 기반 인증을 위해 자격 증명을 허용하며, Origin은 설정 목록에서만 허용합니다.
fn configure_cors(config: &CorsConfig) -> Cors {
    let cors = config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

fn startup_error(err: AppError) -> io::Error {
    error!("❌ 초기화 실패: {}", err);
    io::Error::other(err.to_string())
}
