use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::rfc3339;
use crate::domain::dto::users::OwnerSummary;
use crate::domain::entities::Comment;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment content cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub video: String,
    pub owner: OwnerSummary,
    pub created_at: String,
    pub updated_at: String,
}

impl CommentResponse {
    pub fn new(comment: &Comment, owner: OwnerSummary) -> Self {
        Self {
            id: comment.id.to_hex(),
            content: comment.content.clone(),
            video: comment.video.to_hex(),
            owner,
            created_at: rfc3339(&comment.created_at),
            updated_at: rfc3339(&comment.updated_at),
        }
    }
}
