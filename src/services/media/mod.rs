//! 미디어 호스팅 협력자
//!
//! 업로드된 파일을 외부 호스트에 올리고 `MediaAsset` 참조를 돌려받습니다.
//! 실패는 `ExternalServiceError`로 반환되며 재시도하지 않습니다.
//!
//! - [`CloudinaryClient`]: 서명된 multipart 업로드 (운영)
//! - [`InMemoryMediaHost`]: 가짜 URL을 만드는 메모리 구현 (로컬 실행, 테스트)

pub mod cloudinary;
pub mod memory;

pub use cloudinary::CloudinaryClient;
pub use memory::InMemoryMediaHost;

use async_trait::async_trait;

use crate::core::errors::AppError;
use crate::domain::entities::MediaAsset;

/// multipart 요청에서 읽은 파일 하나
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 폼 필드 이름 (`avatar`, `videoFile` 등)
    pub field_name: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 외부 미디어 호스트 포트
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// 파일을 업로드하고 호스팅된 자산 참조를 반환합니다
    async fn upload(&self, file: UploadedFile) -> Result<MediaAsset, AppError>;

    /// 호스팅된 자산을 삭제합니다
    async fn delete(&self, asset: &MediaAsset) -> Result<(), AppError>;
}
