//! 동영상 HTTP 핸들러
//!
//! 목록/단건 조회는 익명 요청도 허용하며, 비공개 동영상은 소유자에게만 보입니다.
//! 업로드와 수정은 multipart 폼을 받습니다.
use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{ApiResponse, PublishVideoRequest, UpdateVideoRequest, VideoListQuery};
use crate::domain::models::{AuthenticatedUser, OptionalUser};
use crate::handlers::multipart::MultipartForm;

/// 동영상 목록
///
/// # Endpoint
/// `GET /videos?page=&limit=&query=&sortBy=&sortType=&userId=`
#[get("")]
pub async fn list_videos(
    state: web::Data<AppState>,
    viewer: OptionalUser,
    query: web::Query<VideoListQuery>,
) -> Result<HttpResponse, AppError> {
    let videos = state.videos.list(&query, viewer.id()).await?;
    Ok(ApiResponse::ok(videos, "Videos fetched successfully").into_response())
}

/// 동영상 업로드
///
/// # Endpoint
/// `POST /videos` (multipart: title, description, videoFile, thumbnail)
#[post("")]
pub async fn publish_video(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut form = MultipartForm::read(payload, state.config.max_upload_bytes).await?;

    let request = PublishVideoRequest {
        title: form.take_text("title").trim().to_string(),
        description: form.take_text("description").trim().to_string(),
    };
    let video_file = form.take_file("videoFile");
    let thumbnail = form.take_file("thumbnail");

    let video = state
        .videos
        .publish(user.id(), request, video_file, thumbnail)
        .await?;
    Ok(ApiResponse::created(video, "Video published successfully").into_response())
}

/// 동영상 단건 조회
///
/// 조회수가 1 증가하고, 로그인한 시청자의 시청 기록에 추가됩니다.
#[get("/{video_id}")]
pub async fn get_video(
    state: web::Data<AppState>,
    viewer: OptionalUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let video = state.videos.get_by_id(&video_id, viewer.id()).await?;
    Ok(ApiResponse::ok(video, "Video fetched successfully").into_response())
}

#[patch("/{video_id}")]
pub async fn update_video(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut form = MultipartForm::read(payload, state.config.max_upload_bytes).await?;

    let request = UpdateVideoRequest {
        title: form.take_optional_text("title"),
        description: form.take_optional_text("description"),
    };
    let thumbnail = form.take_file("thumbnail");

    let video = state
        .videos
        .update(user.id(), &video_id, request, thumbnail)
        .await?;
    Ok(ApiResponse::ok(video, "Video updated successfully").into_response())
}

#[delete("/{video_id}")]
pub async fn delete_video(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.videos.delete(user.id(), &video_id).await?;
    Ok(ApiResponse::ok(serde_json::json!({}), "Video deleted successfully").into_response())
}

/// 공개 상태 전환
///
/// # Endpoint
/// `PATCH /videos/toggle/publish/{video_id}`
#[patch("/toggle/publish/{video_id}")]
pub async fn toggle_publish(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let video = state.videos.toggle_publish(user.id(), &video_id).await?;
    Ok(ApiResponse::ok(video, "Video publish status toggled").into_response())
}
