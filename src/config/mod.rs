//! 애플리케이션 설정 모듈
//!
//! 모든 설정은 시작 시 한 번 환경변수에서 읽어 `AppConfig`로 묶고,
//! 이후에는 읽기 전용으로 각 서비스에 주입됩니다.

pub mod auth_config;
pub mod data_config;
pub mod media_config;

pub use auth_config::*;
pub use data_config::*;
pub use media_config::*;

use crate::core::errors::AppError;

/// 프로세스 전역 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cookies: CookieConfig,
    /// Cloudinary 자격 증명이 없으면 `None` (로컬 실행 전용)
    pub media: Option<MediaConfig>,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub bcrypt_cost: u32,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// 환경변수에서 전체 설정을 읽어옵니다
    ///
    /// 운영 환경에서는 JWT 시크릿과 Cloudinary 자격 증명이 모두 필요합니다.
    pub fn from_env() -> Result<Self, AppError> {
        let environment = Environment::current();
        let jwt = JwtConfig::from_env(&environment)?;

        let media = match MediaConfig::from_env() {
            Ok(media) => Some(media),
            Err(e) if environment.is_local() => {
                log::warn!("미디어 호스트 설정 없음, 메모리 호스트 사용: {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        let max_upload_bytes = media
            .as_ref()
            .map(|m| m.max_upload_bytes)
            .unwrap_or_else(|| parse_env("MAX_UPLOAD_BYTES", 100 * 1024 * 1024));

        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cookies: CookieConfig::from_env(&environment),
            rate_limit: RateLimitConfig::from_env(),
            cors: CorsConfig::from_env(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(&environment),
            jwt,
            media,
            max_upload_bytes,
            environment,
        })
    }

    /// 개발/테스트용 설정 (메모리 저장소, 고정 시크릿, 최소 bcrypt cost)
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                workers: 1,
            },
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database_name: "streamhub_dev".to_string(),
                backend: StorageBackend::Memory,
            },
            jwt: JwtConfig::development(),
            cookies: CookieConfig { secure: false },
            media: None,
            rate_limit: RateLimitConfig {
                per_second: 100,
                burst_size: 200,
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            bcrypt_cost: PasswordConfig::bcrypt_cost_for_env(&Environment::Development),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}
