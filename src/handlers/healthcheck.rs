//! 헬스체크 핸들러
use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::config::StorageBackend;
use crate::core::state::AppState;
use crate::domain::dto::ApiResponse;

/// 서비스 상태 확인
///
/// 로드밸런서나 모니터링 시스템에서 사용합니다.
///
/// ```json
/// {
///   "statusCode": 200,
///   "data": { "status": "OK", "version": "0.1.0", "storage": "mongodb", "timestamp": "..." },
///   "message": "Health check passed"
/// }
/// ```
#[get("/healthcheck")]
pub async fn healthcheck(state: web::Data<AppState>) -> HttpResponse {
    let storage = match state.config.database.backend {
        StorageBackend::MongoDb => "mongodb",
        StorageBackend::Memory => "memory",
    };

    ApiResponse::ok(
        json!({
            "status": "OK",
            "version": env!("CARGO_PKG_VERSION"),
            "storage": storage,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
        "Health check passed",
    )
    .into_response()
}
