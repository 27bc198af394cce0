//! 메모리 미디어 호스트
//!
//! 업로드된 파일을 보관하고 `memory://` URL을 돌려줍니다. `set_failing(true)`로
//! 호스트 장애를 흉내낼 수 있습니다.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::entities::MediaAsset;
use crate::services::media::{MediaHost, UploadedFile};

#[derive(Default)]
pub struct InMemoryMediaHost {
    files: RwLock<HashMap<String, UploadedFile>>,
    failing: AtomicBool,
}

impl InMemoryMediaHost {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 현재 보관 중인 파일 수
    pub fn stored_count(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }
}

fn resource_type(file: &UploadedFile) -> &'static str {
    match file.content_type.as_deref() {
        Some(ct) if ct.starts_with("video/") => "video",
        Some(ct) if ct.starts_with("image/") => "image",
        _ => "raw",
    }
}

#[async_trait]
impl MediaHost for InMemoryMediaHost {
    async fn upload(&self, file: UploadedFile) -> Result<MediaAsset, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError("미디어 호스트 응답 없음".to_string()));
        }

        let public_id = format!("streamhub/{}", ObjectId::new().to_hex());
        let resource_type = resource_type(&file);
        let asset = MediaAsset {
            url: format!("memory://{}/{}", public_id, file.file_name),
            public_id: public_id.clone(),
            resource_type: resource_type.to_string(),
            duration: (resource_type == "video").then_some(0.0),
        };

        self.files
            .write()
            .map_err(|_| AppError::InternalError("메모리 미디어 락 오염".to_string()))?
            .insert(public_id, file);

        Ok(asset)
    }

    async fn delete(&self, asset: &MediaAsset) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError("미디어 호스트 응답 없음".to_string()));
        }

        self.files
            .write()
            .map_err(|_| AppError::InternalError("메모리 미디어 락 오염".to_string()))?
            .remove(&asset.public_id);

        Ok(())
    }
}
