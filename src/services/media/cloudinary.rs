//! Cloudinary 업로드 클라이언트
//!
//! 요청 서명은 `key=value`를 키 순서로 `&`로 이은 문자열 뒤에 API 시크릿을 붙여
//! SHA-256 해시한 16진수 문자열입니다. `file`, `api_key`, `resource_type`은
//! 서명 대상에서 제외됩니다.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::MediaConfig;
use crate::core::errors::AppError;
use crate::domain::entities::MediaAsset;
use crate::services::media::{MediaHost, UploadedFile};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
    public_id: String,
    resource_type: String,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct CloudinaryClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl CloudinaryClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn sign(&self, params: &[(&str, String)]) -> String {
        sign_params(params, &self.config.api_secret)
    }
}

/// 파라미터 서명 (키 순 정렬 후 시크릿을 붙여 SHA-256)
fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha256::digest(format!("{}{}", joined, api_secret).as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, file: UploadedFile) -> Result<MediaAsset, AppError> {
        let timestamp = Utc::now().timestamp().to_string();
        let params = [
            ("folder", self.config.folder.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = self.sign(&params);

        let mut part = Part::bytes(file.bytes).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::ValidationError(format!("Invalid content type: {}", e)))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("folder", self.config.folder.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self.http
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("미디어 업로드 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "미디어 업로드 실패: {}",
                error_text
            )));
        }

        let uploaded = response
            .json::<UploadResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("업로드 응답 파싱 실패: {}", e)))?;

        let url = uploaded
            .secure_url
            .or(uploaded.url)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::ExternalServiceError("업로드 응답에 URL이 없습니다".to_string()))?;

        log::info!("미디어 업로드 완료: {} ({})", uploaded.public_id, file.field_name);

        Ok(MediaAsset {
            url,
            public_id: uploaded.public_id,
            resource_type: uploaded.resource_type,
            duration: uploaded.duration,
        })
    }

    async fn delete(&self, asset: &MediaAsset) -> Result<(), AppError> {
        let timestamp = Utc::now().timestamp().to_string();
        let params = [
            ("public_id", asset.public_id.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = self.sign(&params);

        let form = [
            ("public_id", asset.public_id.clone()),
            ("timestamp", timestamp),
            ("api_key", self.config.api_key.clone()),
            ("signature", signature),
            ("signature_algorithm", "sha256".to_string()),
        ];

        let response = self.http
            .post(self.config.destroy_url(&asset.resource_type))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("미디어 삭제 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "미디어 삭제 실패: {}",
                error_text
            )));
        }

        let destroyed = response
            .json::<DestroyResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("삭제 응답 파싱 실패: {}", e)))?;

        if destroyed.result != "ok" {
            log::warn!("미디어 삭제 결과: {} ({})", destroyed.result, asset.public_id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_order_independent() {
        let a = sign_params(&[("timestamp", "1".into()), ("folder", "f".into())], "secret");
        let b = sign_params(&[("folder", "f".into()), ("timestamp", "1".into())], "secret");

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let params = [("folder", "f".to_string()), ("timestamp", "1".to_string())];
        assert_ne!(sign_params(&params, "one"), sign_params(&params, "two"));
    }
}
