//! # User Management HTTP Handlers
//!
//! 로그인한 사용자의 계정 관리와 채널 프로필 조회 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/users/current-user` | 현재 사용자 |
//! | `POST` | `/users/change-password` | 비밀번호 변경 |
//! | `PATCH` | `/users/update-account` | 이름/이메일 수정 |
//! | `PATCH` | `/users/avatar` | 아바타 교체 (multipart `avatar`) |
//! | `PATCH` | `/users/cover-image` | 커버 이미지 교체 (multipart `coverImage`) |
//! | `GET` | `/users/c/{username}` | 채널 프로필 (구독 여부 포함) |
//! | `GET` | `/users/history` | 시청 기록 |
use actix_multipart::Multipart;
use actix_web::{HttpResponse, get, patch, post, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{ApiResponse, ChangePasswordRequest, UpdateAccountRequest};
use crate::domain::models::{AuthenticatedUser, OptionalUser};
use crate::handlers::multipart::MultipartForm;

#[get("/current-user")]
pub async fn current_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.users.current_user(user.id()).await?;
    Ok(ApiResponse::ok(response, "Current user fetched successfully").into_response())
}

/// 비밀번호 변경
///
/// # Endpoint
/// `POST /users/change-password`
#[post("/change-password")]
pub async fn change_password(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    state.users.change_password(user.id(), payload.into_inner()).await?;
    Ok(ApiResponse::ok(serde_json::json!({}), "Password changed successfully").into_response())
}

#[patch("/update-account")]
pub async fn update_account(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.users.update_account(user.id(), payload.into_inner()).await?;
    Ok(ApiResponse::ok(response, "Account details updated successfully").into_response())
}

/// 아바타 교체
///
/// 새 이미지를 올린 뒤 이전 이미지는 미디어 호스트에서 삭제합니다.
#[patch("/avatar")]
pub async fn update_avatar(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut form = MultipartForm::read(payload, state.config.max_upload_bytes).await?;
    let response = state.users.update_avatar(user.id(), form.take_file("avatar")).await?;
    Ok(ApiResponse::ok(response, "Avatar image updated successfully").into_response())
}

#[patch("/cover-image")]
pub async fn update_cover_image(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut form = MultipartForm::read(payload, state.config.max_upload_bytes).await?;
    let response = state
        .users
        .update_cover_image(user.id(), form.take_file("coverImage"))
        .await?;
    Ok(ApiResponse::ok(response, "Cover image updated successfully").into_response())
}

/// 채널 프로필 조회
///
/// # Endpoint
/// `GET /users/c/{username}`
///
/// 구독자 수, 구독 중인 채널 수, 요청자의 구독 여부를 함께 반환합니다.
/// 익명 요청이면 `isSubscribed`는 항상 false입니다.
#[get("/c/{username}")]
pub async fn channel_profile(
    state: web::Data<AppState>,
    viewer: OptionalUser,
    username: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.users.channel_profile(&username, viewer.id()).await?;
    Ok(ApiResponse::ok(response, "User channel fetched successfully").into_response())
}

#[get("/history")]
pub async fn watch_history(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let videos = state.users.watch_history(user.id()).await?;
    Ok(ApiResponse::ok(videos, "Watch history fetched successfully").into_response())
}
