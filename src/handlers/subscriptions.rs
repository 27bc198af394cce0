//! 구독 HTTP 핸들러
//!
//! - `POST /subscriptions/c/{channel_id}` 구독 토글 (자기 자신은 구독 불가)
//! - `GET /subscriptions/c/{channel_id}` 채널의 구독자 목록
//! - `GET /subscriptions/u/{subscriber_id}` 사용자가 구독한 채널 목록
use actix_web::{HttpResponse, get, post, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::ApiResponse;
use crate::domain::entities::EdgeKind;
use crate::domain::models::AuthenticatedUser;
use crate::handlers::likes::toggle_response;

#[post("/c/{channel_id}")]
pub async fn toggle_subscription(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    channel_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .edges
        .toggle(user.id(), &channel_id, EdgeKind::Subscription)
        .await?;
    Ok(toggle_response(result, "Subscribed successfully", "Unsubscribed successfully"))
}

#[get("/c/{channel_id}")]
pub async fn channel_subscribers(
    state: web::Data<AppState>,
    channel_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let subscribers = state.edges.subscribers(&channel_id).await?;
    Ok(ApiResponse::ok(subscribers, "Subscribers fetched successfully").into_response())
}

#[get("/u/{subscriber_id}")]
pub async fn subscribed_channels(
    state: web::Data<AppState>,
    subscriber_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let channels = state.edges.subscribed_channels(&subscriber_id).await?;
    Ok(ApiResponse::ok(channels, "Subscribed channels fetched successfully").into_response())
}
