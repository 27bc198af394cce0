use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::dto::rfc3339;
use crate::domain::entities::Playlist;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlaylistRequest {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 2000, message = "Description is required"))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_playlist_update"))]
pub struct UpdatePlaylistRequest {
    #[validate(length(min = 1, max = 120, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "Description cannot be empty"))]
    pub description: Option<String>,
}

fn validate_playlist_update(req: &UpdatePlaylistRequest) -> Result<(), ValidationError> {
    if req.name.is_none() && req.description.is_none() {
        return Err(ValidationError::new("empty_update")
            .with_message("At least one field (name or description) is required".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub videos: Vec<String>,
    pub total_videos: usize,
    pub owner: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Playlist> for PlaylistResponse {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.to_hex(),
            name: playlist.name.clone(),
            description: playlist.description.clone(),
            videos: playlist.videos.iter().map(|v| v.to_hex()).collect(),
            total_videos: playlist.videos.len(),
            owner: playlist.owner.to_hex(),
            created_at: rfc3339(&playlist.created_at),
            updated_at: rfc3339(&playlist.updated_at),
        }
    }
}
