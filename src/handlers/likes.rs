//! 좋아요 토글 HTTP 핸들러
//!
//! 토글 결과 좋아요가 생기면 201, 취소되면 200으로 응답합니다.
use actix_web::{HttpResponse, get, post, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{ApiResponse, ToggleResponse};
use crate::domain::entities::EdgeKind;
use crate::domain::models::AuthenticatedUser;

#[post("/toggle/v/{video_id}")]
pub async fn toggle_video_like(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let result = state.edges.toggle(user.id(), &video_id, EdgeKind::VideoLike).await?;
    Ok(toggle_response(result, "Video liked", "Video like removed"))
}

#[post("/toggle/c/{comment_id}")]
pub async fn toggle_comment_like(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    comment_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let result = state.edges.toggle(user.id(), &comment_id, EdgeKind::CommentLike).await?;
    Ok(toggle_response(result, "Comment liked", "Comment like removed"))
}

#[post("/toggle/t/{tweet_id}")]
pub async fn toggle_tweet_like(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    tweet_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let result = state.edges.toggle(user.id(), &tweet_id, EdgeKind::TweetLike).await?;
    Ok(toggle_response(result, "Tweet liked", "Tweet like removed"))
}

/// 좋아요한 동영상 목록
#[get("/videos")]
pub async fn liked_videos(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let videos = state.edges.liked_videos(user.id()).await?;
    Ok(ApiResponse::ok(videos, "Liked videos fetched successfully").into_response())
}

/// 토글 결과를 상태 코드가 다른 두 응답 중 하나로 변환
pub(crate) fn toggle_response(result: ToggleResponse, created: &str, removed: &str) -> HttpResponse {
    if result.active {
        ApiResponse::created(result, created).into_response()
    } else {
        ApiResponse::ok(result, removed).into_response()
    }
}
