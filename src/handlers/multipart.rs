//! multipart/form-data 요청 읽기
//!
//! 텍스트 필드와 파일 필드를 한 번에 메모리로 읽어 들입니다.
//! 파일 하나가 `max_file_bytes`를 넘으면 읽기를 중단하고 400으로 응답합니다.

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::TryStreamExt;

use crate::core::errors::AppError;
use crate::services::media::UploadedFile;

/// 텍스트 필드 하나의 최대 크기
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// 읽기가 끝난 multipart 폼
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// 요청 본문 전체를 읽습니다
    ///
    /// 파일 이름이 있는 파트는 파일로, 없는 파트는 UTF-8 텍스트로 취급합니다.
    /// 같은 이름의 필드가 여러 번 오면 마지막 값이 남습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - multipart 형식 오류, 크기 초과, UTF-8이 아닌 텍스트
    pub async fn read(mut payload: Multipart, max_file_bytes: usize) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(mut field) = payload
            .try_next()
            .await
            .map_err(|e| AppError::ValidationError(format!("Invalid multipart data: {}", e)))?
        {
            let (name, file_name) = match field.content_disposition() {
                Some(cd) => (
                    cd.get_name().unwrap_or_default().to_string(),
                    cd.get_filename().map(str::to_string),
                ),
                None => continue,
            };
            if name.is_empty() {
                continue;
            }

            let limit = if file_name.is_some() { max_file_bytes } else { MAX_TEXT_FIELD_BYTES };
            let content_type = field.content_type().map(|m| m.to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field
                .try_next()
                .await
                .map_err(|e| AppError::ValidationError(format!("Invalid multipart data: {}", e)))?
            {
                if bytes.len() + chunk.len() > limit {
                    return Err(AppError::ValidationError(format!(
                        "Field '{}' exceeds the maximum size of {} bytes",
                        name, limit
                    )));
                }
                bytes.extend_from_slice(&chunk);
            }

            match file_name {
                Some(file_name) => {
                    form.files.insert(
                        name.clone(),
                        UploadedFile {
                            field_name: name,
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let text = String::from_utf8(bytes).map_err(|_| {
                        AppError::ValidationError(format!("Field '{}' must be UTF-8 text", name))
                    })?;
                    form.fields.insert(name, text);
                }
            }
        }

        log::debug!(
            "multipart 읽기 완료: 텍스트 {}개, 파일 {}개",
            form.fields.len(),
            form.files.len()
        );
        Ok(form)
    }

    /// 텍스트 필드를 꺼냅니다 (없으면 빈 문자열)
    pub fn take_text(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    /// 값이 비어 있지 않은 텍스트 필드만 꺼냅니다
    pub fn take_optional_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name).filter(|v| !v.trim().is_empty())
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
