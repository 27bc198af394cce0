//! # Application Error Handling System
//!
//! 백엔드 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 에러를 정의하고 `actix_web::ResponseError`를 구현하여
//! 모든 핸들러 실패가 동일한 실패 응답 형식으로 변환되도록 합니다.
//!
//! ## 실패 응답 형식
//!
//! ```json
//! { "statusCode": 404, "message": "Video not found" }
//! ```
//!
//! 5xx 계열 에러는 내부 메시지를 노출하지 않고 일반 메시지만 응답하며,
//! 상세 내용은 `log::error!`로만 남깁니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn find_video(&self, id: &str) -> Result<Video, AppError> {
//!     let id = parse_object_id(id, "video")?;
//!     self.videos.find_by_id(&id).await?
//!         .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error};
use serde::Serialize;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 각 변형은 하나의 HTTP 상태 코드에 대응합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 전달할 메시지
    ///
    /// 4xx 에러는 원래 메시지를 그대로, 5xx 에러는 일반 메시지를 반환합니다.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg) => msg.clone(),
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

/// 실패 응답 본문
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
        }
    }
}

impl error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        } else {
            log::debug!("요청 거부 ({}): {}", status.as_u16(), self);
        }

        HttpResponse::build(status).json(ErrorBody::new(status, self.public_message()))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

/// JSON 본문 추출 실패를 400 실패 응답으로 변환
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
}

/// 쿼리 문자열 추출 실패를 400 실패 응답으로 변환
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid query parameters: {}", err)).into()
}

/// 경로 파라미터 추출 실패를 400 실패 응답으로 변환
pub fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid path parameters: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("User not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Username already taken".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Not the owner".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().try_into_bytes().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["message"], "Internal server error");
        assert!(!String::from_utf8_lossy(&bytes).contains("10.0.0.3"));
    }

    #[test]
    fn test_client_errors_keep_message() {
        let error = AppError::ValidationError("Invalid video ID".to_string());
        let bytes = error.error_response().into_body().try_into_bytes().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["message"], "Invalid video ID");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
