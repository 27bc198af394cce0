//! 미디어 호스팅(Cloudinary) 설정

use std::env;

use crate::config::data_config::parse_env;
use crate::core::errors::AppError;

/// Cloudinary 업로드 자격 증명과 업로드 제한
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// 업로드 대상 폴더
    pub folder: String,
    /// 업로드 파일 하나의 최대 크기 (bytes)
    pub max_upload_bytes: usize,
}

impl MediaConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            api_key: required("CLOUDINARY_API_KEY")?,
            api_secret: required("CLOUDINARY_API_SECRET")?,
            folder: env::var("CLOUDINARY_FOLDER").unwrap_or_else(|_| "streamhub".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 100 * 1024 * 1024),
        })
    }

    /// 업로드 API 엔드포인트
    pub fn upload_url(&self) -> String {
        format!("https://api.cloudinary.com/v1_1/{}/auto/upload", self.cloud_name)
    }

    /// 삭제 API 엔드포인트
    pub fn destroy_url(&self, resource_type: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/{}/destroy",
            self.cloud_name, resource_type
        )
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::InternalError(format!("{} must be set", key)))
}
