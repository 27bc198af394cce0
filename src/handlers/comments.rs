//! 댓글 HTTP 핸들러
//!
//! - `GET /comments/{video_id}?page=&limit=` 동영상 댓글 목록 (최신순)
//! - `POST /comments/{video_id}` 댓글 작성
//! - `PATCH|DELETE /comments/c/{comment_id}` 작성자 전용 수정/삭제
use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{ApiResponse, CommentRequest, PageQuery};
use crate::domain::models::AuthenticatedUser;

#[get("/{video_id}")]
pub async fn video_comments(
    state: web::Data<AppState>,
    video_id: web::Path<String>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let comments = state.comments.list_for_video(&video_id, &page).await?;
    Ok(ApiResponse::ok(comments, "Comments fetched successfully").into_response())
}

#[post("/{video_id}")]
pub async fn add_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> Result<HttpResponse, AppError> {
    let comment = state
        .comments
        .add(user.id(), &video_id, payload.into_inner())
        .await?;
    Ok(ApiResponse::created(comment, "Comment added successfully").into_response())
}

#[patch("/c/{comment_id}")]
pub async fn update_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    comment_id: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> Result<HttpResponse, AppError> {
    let comment = state
        .comments
        .update(user.id(), &comment_id, payload.into_inner())
        .await?;
    Ok(ApiResponse::ok(comment, "Comment updated successfully").into_response())
}

#[delete("/c/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    comment_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.comments.delete(user.id(), &comment_id).await?;
    Ok(ApiResponse::ok(serde_json::json!({}), "Comment deleted successfully").into_response())
}
