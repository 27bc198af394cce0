//! 트윗 HTTP 핸들러
use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{ApiResponse, TweetRequest};
use crate::domain::models::AuthenticatedUser;

#[post("")]
pub async fn create_tweet(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<TweetRequest>,
) -> Result<HttpResponse, AppError> {
    let tweet = state.tweets.create(user.id(), payload.into_inner()).await?;
    Ok(ApiResponse::created(tweet, "Tweet created successfully").into_response())
}

/// 사용자의 트윗 목록 (최신순)
#[get("/user/{user_id}")]
pub async fn user_tweets(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let tweets = state.tweets.list_by_user(&user_id).await?;
    Ok(ApiResponse::ok(tweets, "Tweets fetched successfully").into_response())
}

#[patch("/{tweet_id}")]
pub async fn update_tweet(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    tweet_id: web::Path<String>,
    payload: web::Json<TweetRequest>,
) -> Result<HttpResponse, AppError> {
    let tweet = state
        .tweets
        .update(user.id(), &tweet_id, payload.into_inner())
        .await?;
    Ok(ApiResponse::ok(tweet, "Tweet updated successfully").into_response())
}

#[delete("/{tweet_id}")]
pub async fn delete_tweet(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    tweet_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.tweets.delete(user.id(), &tweet_id).await?;
    Ok(ApiResponse::ok(serde_json::json!({}), "Tweet deleted successfully").into_response())
}
