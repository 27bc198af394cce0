use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Owned;

/// 재생목록
///
/// `videos`는 추가된 순서를 유지하며 같은 동영상을 두 번 담지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub videos: Vec<ObjectId>,
    pub owner: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Playlist {
    pub fn new(owner: ObjectId, name: &str, description: &str) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            videos: Vec::new(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, video: &ObjectId) -> bool {
        self.videos.contains(video)
    }
}

impl Owned for Playlist {
    fn owner_id(&self) -> &ObjectId {
        &self.owner
    }
}
