//! # Authentication Configuration Module
//!
//! JWT 토큰과 인증 쿠키 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export ACCESS_TOKEN_SECRET="your-access-token-secret"
//! export REFRESH_TOKEN_SECRET="your-refresh-token-secret"
//! export ACCESS_TOKEN_EXPIRY_MINUTES="1440"
//! export REFRESH_TOKEN_EXPIRY_DAYS="10"
//! export COOKIE_SECURE="true"
//! ```
//!
//! 운영 환경에서는 두 시크릿이 반드시 설정되어야 하며, 개발/테스트 환경에서는
//! 경고 로그와 함께 고정된 개발용 값을 사용합니다.

use std::env;

use chrono::Duration;

use crate::config::data_config::{Environment, parse_env};
use crate::core::errors::AppError;

/// JWT 서명 및 만료 설정
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 시크릿으로 서명됩니다.
/// 한쪽 시크릿이 노출되어도 다른 종류의 토큰을 위조할 수 없습니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtConfig {
    /// 환경변수에서 JWT 설정을 읽어옵니다
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 운영/스테이징 환경에서 시크릿이 설정되지 않은 경우
    pub fn from_env(environment: &Environment) -> Result<Self, AppError> {
        let access_secret = Self::secret_from_env("ACCESS_TOKEN_SECRET", environment)?;
        let refresh_secret = Self::secret_from_env("REFRESH_TOKEN_SECRET", environment)?;

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl: Duration::minutes(parse_env("ACCESS_TOKEN_EXPIRY_MINUTES", 1440)),
            refresh_ttl: Duration::days(parse_env("REFRESH_TOKEN_EXPIRY_DAYS", 10)),
        })
    }

    /// 개발/테스트용 고정 설정
    pub fn development() -> Self {
        Self {
            access_secret: "development-access-secret".to_string(),
            refresh_secret: "development-refresh-secret".to_string(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(10),
        }
    }

    fn secret_from_env(key: &str, environment: &Environment) -> Result<String, AppError> {
        match env::var(key) {
            Ok(secret) if !secret.trim().is_empty() => Ok(secret),
            _ if environment.is_local() => {
                log::warn!("{}가 설정되지 않았습니다. 개발용 기본값을 사용합니다", key);
                Ok(format!("development-{}", key.to_lowercase()))
            }
            _ => Err(AppError::InternalError(format!(
                "{} must be set outside development",
                key
            ))),
        }
    }
}

/// 인증 쿠키 설정
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// `Secure` 속성 부여 여부
    pub secure: bool,
}

impl CookieConfig {
    pub fn from_env(environment: &Environment) -> Self {
        let secure = env::var("COOKIE_SECURE")
            .ok()
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(!environment.is_local());

        Self { secure }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_requires_secrets() {
        if env::var("ACCESS_TOKEN_SECRET").is_err() {
            let result = JwtConfig::from_env(&Environment::Production);
            assert!(matches!(result, Err(AppError::InternalError(_))));
        }
    }

    #[test]
    fn test_development_falls_back_to_distinct_secrets() {
        if env::var("ACCESS_TOKEN_SECRET").is_err() && env::var("REFRESH_TOKEN_SECRET").is_err() {
            let config = JwtConfig::from_env(&Environment::Development).unwrap();
            assert_ne!(config.access_secret, config.refresh_secret);
        }
    }

    #[test]
    fn test_development_preset_has_short_access_ttl() {
        let config = JwtConfig::development();
        assert!(config.access_ttl < config.refresh_ttl);
    }
}
