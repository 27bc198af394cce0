//! 채널 대시보드 HTTP 핸들러
use actix_web::{HttpResponse, get, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::ApiResponse;
use crate::domain::models::AuthenticatedUser;

/// 내 채널 통계 (동영상 수, 총 조회수, 구독자 수, 받은 좋아요 수)
#[get("/stats")]
pub async fn channel_stats(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let stats = state.dashboard.channel_stats(user.id()).await?;
    Ok(ApiResponse::ok(stats, "Channel stats fetched successfully").into_response())
}

/// 내 채널의 모든 동영상 (비공개 포함)
#[get("/videos")]
pub async fn channel_videos(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let videos = state.videos.list_by_owner(user.id()).await?;
    Ok(ApiResponse::ok(videos, "Channel videos fetched successfully").into_response())
}
