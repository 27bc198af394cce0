//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 환경 및 보안 관련 설정을 관리합니다.

use std::env;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경변수에서 현재 환경을 결정합니다 (기본값: production)
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 로컬 개발/테스트 환경 여부
    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost 값
    ///
    /// `BCRYPT_COST`가 4~15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost(env: &Environment) -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(env)
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PORT", 8000),
            workers: parse_env("SERVER_WORKERS", 4),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 저장소 백엔드 종류
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// MongoDB 컬렉션
    MongoDb,
    /// 프로세스 메모리 (로컬 실행용, 재시작 시 유실)
    Memory,
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
    pub backend: StorageBackend,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" | "in-memory" => StorageBackend::Memory,
            _ => StorageBackend::MongoDb,
        };

        Self {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "streamhub_dev".to_string()),
            backend,
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            per_second: parse_env("RATE_LIMIT_PER_SECOND", 100),
            burst_size: parse_env("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

/// CORS 허용 Origin 목록
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            allowed_origins: raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// 환경변수를 파싱하고, 없거나 잘못된 값이면 기본값을 사용합니다
pub(crate) fn parse_env<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            log::error!("{} 파싱 실패: {}. 기본값 {} 사용", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("dev"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() && env::var("HOST").is_err() {
            let config = ServerConfig::from_env();
            assert_eq!(config.bind_address(), "0.0.0.0:8000");
        }
    }

    #[test]
    fn test_parse_env_falls_back_on_missing_key() {
        let value: u64 = parse_env("STREAMHUB_TEST_SURELY_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
