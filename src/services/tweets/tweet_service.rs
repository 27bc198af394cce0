use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::{TweetRequest, TweetResponse};
use crate::domain::entities::Tweet;
use crate::repositories::{Repositories, TweetRepository, UserRepository};
use crate::services::ownership::{ensure_owner, parse_object_id, require_found};

/// 트윗 서비스
pub struct TweetService {
    tweets: Arc<dyn TweetRepository>,
    users: Arc<dyn UserRepository>,
}

impl TweetService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            tweets: repositories.tweets.clone(),
            users: repositories.users.clone(),
        }
    }

    pub async fn create(&self, owner: &ObjectId, request: TweetRequest) -> Result<TweetResponse, AppError> {
        let content = validated_content(request)?;
        let tweet = self.tweets.create(Tweet::new(*owner, &content)).await?;
        Ok(TweetResponse::from(&tweet))
    }

    /// 사용자의 트윗 (최신순)
    pub async fn list_by_user(&self, raw_user: &str) -> Result<Vec<TweetResponse>, AppError> {
        let user = parse_object_id(raw_user, "user")?;
        require_found(self.users.find_by_id(&user).await?, "user")?;

        let tweets = self.tweets.list_by_owner(&user).await?;
        Ok(tweets.iter().map(TweetResponse::from).collect())
    }

    pub async fn update(&self, actor: &ObjectId, raw_id: &str, request: TweetRequest) -> Result<TweetResponse, AppError> {
        let id = parse_object_id(raw_id, "tweet")?;
        let tweet = require_found(self.tweets.find_by_id(&id).await?, "tweet")?;
        ensure_owner(&tweet, actor, "tweet")?;

        let content = validated_content(request)?;

        let updated = require_found(self.tweets.update_content(&id, &content).await?, "tweet")?;
        Ok(TweetResponse::from(&updated))
    }

    pub async fn delete(&self, actor: &ObjectId, raw_id: &str) -> Result<(), AppError> {
        let id = parse_object_id(raw_id, "tweet")?;
        let tweet = require_found(self.tweets.find_by_id(&id).await?, "tweet")?;
        ensure_owner(&tweet, actor, "tweet")?;

        if !self.tweets.delete(&id).await? {
            return Err(AppError::NotFound("Tweet not found".to_string()));
        }
        Ok(())
    }
}

fn validated_content(request: TweetRequest) -> Result<String, AppError> {
    let request = TweetRequest {
        content: request.content.trim().to_string(),
    };
    request
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    Ok(request.content)
}
