use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Owned;

/// 짧은 텍스트 게시글
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub content: String,
    pub owner: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Tweet {
    pub fn new(owner: ObjectId, content: &str) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            content: content.trim().to_string(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Tweet {
    fn owner_id(&self) -> &ObjectId {
        &self.owner
    }
}
