use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{MediaAsset, Owned};

/// 동영상 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub video_file: MediaAsset,
    pub thumbnail: MediaAsset,
    pub title: String,
    pub description: String,
    /// 재생 시간(초)
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Video {
    pub fn new(
        owner: ObjectId,
        title: &str,
        description: &str,
        video_file: MediaAsset,
        thumbnail: MediaAsset,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: ObjectId::new(),
            duration: video_file.duration.unwrap_or(0.0),
            video_file,
            thumbnail,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            views: 0,
            is_published: true,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// 시청자에게 보이는지 여부 (비공개 영상은 소유자만)
    pub fn is_visible_to(&self, viewer: Option<&ObjectId>) -> bool {
        self.is_published || viewer == Some(&self.owner)
    }
}

impl Owned for Video {
    fn owner_id(&self) -> &ObjectId {
        &self.owner
    }
}
