use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Owned;

/// 동영상 댓글
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub content: String,
    pub video: ObjectId,
    pub owner: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Comment {
    pub fn new(owner: ObjectId, video: ObjectId, content: &str) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            content: content.trim().to_string(),
            video,
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> &ObjectId {
        &self.owner
    }
}
