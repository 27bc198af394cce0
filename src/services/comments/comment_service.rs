//! 댓글 서비스
//!
//! 댓글은 존재하는 동영상에만 달 수 있습니다. 목록은 최신순 페이지 단위입니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::{CommentRequest, CommentResponse, OwnerSummary, PageQuery, PageRequest};
use crate::domain::entities::Comment;
use crate::repositories::{CommentRepository, Repositories, UserRepository, VideoRepository};
use crate::services::ownership::{ensure_owner, owner_summaries, parse_object_id, require_found};

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    videos: Arc<dyn VideoRepository>,
    users: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            comments: repositories.comments.clone(),
            videos: repositories.videos.clone(),
            users: repositories.users.clone(),
        }
    }

    pub async fn list_for_video(&self, raw_video: &str, page: &PageQuery) -> Result<Vec<CommentResponse>, AppError> {
        let video = parse_object_id(raw_video, "video")?;
        require_found(self.videos.find_by_id(&video).await?, "video")?;

        let comments = self.comments.list_by_video(&video, PageRequest::from(page)).await?;
        let owners: Vec<ObjectId> = comments.iter().map(|c| c.owner).collect();
        let summaries = owner_summaries(&self.users, &owners).await?;

        Ok(comments
            .iter()
            .map(|comment| {
                let owner = summaries
                    .get(&comment.owner)
                    .cloned()
                    .unwrap_or_else(|| OwnerSummary::unknown(comment.owner.to_hex()));
                CommentResponse::new(comment, owner)
            })
            .collect())
    }

    pub async fn add(&self, actor: &ObjectId, raw_video: &str, request: CommentRequest) -> Result<CommentResponse, AppError> {
        let video = parse_object_id(raw_video, "video")?;
        let content = validated_content(request)?;
        require_found(self.videos.find_by_id(&video).await?, "video")?;

        let comment = self.comments.create(Comment::new(*actor, video, &content)).await?;
        self.respond(&comment).await
    }

    pub async fn update(&self, actor: &ObjectId, raw_id: &str, request: CommentRequest) -> Result<CommentResponse, AppError> {
        let id = parse_object_id(raw_id, "comment")?;
        let comment = require_found(self.comments.find_by_id(&id).await?, "comment")?;
        ensure_owner(&comment, actor, "comment")?;

        let content = validated_content(request)?;

        let updated = require_found(self.comments.update_content(&id, &content).await?, "comment")?;
        self.respond(&updated).await
    }

    pub async fn delete(&self, actor: &ObjectId, raw_id: &str) -> Result<(), AppError> {
        let id = parse_object_id(raw_id, "comment")?;
        let comment = require_found(self.comments.find_by_id(&id).await?, "comment")?;
        ensure_owner(&comment, actor, "comment")?;

        if !self.comments.delete(&id).await? {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
        Ok(())
    }

    async fn respond(&self, comment: &Comment) -> Result<CommentResponse, AppError> {
        let owner = self.users
            .find_by_id(&comment.owner)
            .await?
            .map(|user| OwnerSummary::from(&user))
            .unwrap_or_else(|| OwnerSummary::unknown(comment.owner.to_hex()));

        Ok(CommentResponse::new(comment, owner))
    }
}

fn validated_content(request: CommentRequest) -> Result<String, AppError> {
    let request = CommentRequest {
        content: request.content.trim().to_string(),
    };
    request
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    Ok(request.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_comment_requires_existing_video() {
        let service = CommentService::new(&Repositories::in_memory());
        let request = CommentRequest { content: "nice".to_string() };

        let result = service.add(&ObjectId::new(), &ObjectId::new().to_hex(), request).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
