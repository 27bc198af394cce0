//! 재생목록 HTTP 핸들러
//!
//! 조회는 공개이고, 생성/수정/삭제와 동영상 추가/제거는 소유자만 할 수 있습니다.
use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{ApiResponse, CreatePlaylistRequest, UpdatePlaylistRequest};
use crate::domain::models::AuthenticatedUser;

#[post("")]
pub async fn create_playlist(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreatePlaylistRequest>,
) -> Result<HttpResponse, AppError> {
    let playlist = state.playlists.create(user.id(), payload.into_inner()).await?;
    Ok(ApiResponse::created(playlist, "Playlist created successfully").into_response())
}

#[get("/user/{user_id}")]
pub async fn user_playlists(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let playlists = state.playlists.list_by_user(&user_id).await?;
    Ok(ApiResponse::ok(playlists, "User playlists fetched successfully").into_response())
}

#[get("/{playlist_id}")]
pub async fn get_playlist(
    state: web::Data<AppState>,
    playlist_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let playlist = state.playlists.get_by_id(&playlist_id).await?;
    Ok(ApiResponse::ok(playlist, "Playlist fetched successfully").into_response())
}

#[patch("/{playlist_id}")]
pub async fn update_playlist(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    playlist_id: web::Path<String>,
    payload: web::Json<UpdatePlaylistRequest>,
) -> Result<HttpResponse, AppError> {
    let playlist = state
        .playlists
        .update(user.id(), &playlist_id, payload.into_inner())
        .await?;
    Ok(ApiResponse::ok(playlist, "Playlist updated successfully").into_response())
}

#[delete("/{playlist_id}")]
pub async fn delete_playlist(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    playlist_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.playlists.delete(user.id(), &playlist_id).await?;
    Ok(ApiResponse::ok(serde_json::json!({}), "Playlist deleted successfully").into_response())
}

/// 재생목록에 동영상 추가
///
/// # Endpoint
/// `PATCH /playlist/add/{video_id}/{playlist_id}`
///
/// 이미 들어 있는 동영상이면 400을 반환하며 재생목록은 바뀌지 않습니다.
#[patch("/add/{video_id}/{playlist_id}")]
pub async fn add_video(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (video_id, playlist_id) = path.into_inner();
    let playlist = state
        .playlists
        .add_video(user.id(), &video_id, &playlist_id)
        .await?;
    Ok(ApiResponse::ok(playlist, "Video added to playlist").into_response())
}

#[patch("/remove/{video_id}/{playlist_id}")]
pub async fn remove_video(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (video_id, playlist_id) = path.into_inner();
    let playlist = state
        .playlists
        .remove_video(user.id(), &video_id, &playlist_id)
        .await?;
    Ok(ApiResponse::ok(playlist, "Video removed from playlist").into_response())
}
