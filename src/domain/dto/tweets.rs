use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::rfc3339;
use crate::domain::entities::Tweet;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TweetRequest {
    #[validate(length(min = 1, max = 500, message = "Content is required"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetResponse {
    pub id: String,
    pub content: String,
    pub owner: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Tweet> for TweetResponse {
    fn from(tweet: &Tweet) -> Self {
        Self {
            id: tweet.id.to_hex(),
            content: tweet.content.clone(),
            owner: tweet.owner.to_hex(),
            created_at: rfc3339(&tweet.created_at),
            updated_at: rfc3339(&tweet.updated_at),
        }
    }
}
