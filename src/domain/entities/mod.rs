//! 도메인 엔티티
//!
//! MongoDB 문서와 1:1로 대응하는 영속 모델입니다. 모든 ID는 생성 시점에
//! `ObjectId::new()`로 할당되므로 저장 전후의 엔티티가 같은 ID를 가집니다.

pub mod comment;
pub mod edge;
pub mod media;
pub mod playlist;
pub mod tweet;
pub mod user;
pub mod video;

pub use comment::Comment;
pub use edge::{Edge, EdgeKind};
pub use media::MediaAsset;
pub use playlist::Playlist;
pub use tweet::Tweet;
pub use user::{User, normalize_handle};
pub use video::Video;

use mongodb::bson::oid::ObjectId;

/// 소유자가 있는 콘텐츠 엔티티
///
/// 수정/삭제는 소유자만 할 수 있습니다.
pub trait Owned {
    fn owner_id(&self) -> &ObjectId;
}
