//! # Repository Layer
//!
//! 컬렉션별 데이터 액세스 포트(trait)와 그 구현체입니다.
//!
//! - `Mongo*Repository`: MongoDB 컬렉션 구현. 시작 시 인덱스를 생성합니다.
//! - `memory::*`: 같은 계약을 `RwLock<HashMap>`으로 구현한 메모리 저장소.
//!   로컬 실행(`STORAGE_BACKEND=memory`)과 테스트에서 사용합니다.
//!
//! 동시성 충돌은 저장소 수준에서 해결합니다. 유니크 인덱스 위반은
//! `AppError::ConflictError`로, 조건부 갱신 실패는 `None`/`false`로 돌려줍니다.

pub mod comments;
pub mod edges;
pub mod memory;
pub mod playlists;
pub mod tweets;
pub mod users;
pub mod videos;

pub use comments::*;
pub use edges::*;
pub use playlists::*;
pub use tweets::*;
pub use users::*;
pub use videos::*;

use std::sync::Arc;

use mongodb::bson::Bson;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::core::errors::AppError;
use crate::db::Database;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// 애플리케이션이 사용하는 저장소 묶음
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub videos: Arc<dyn VideoRepository>,
    pub tweets: Arc<dyn TweetRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub playlists: Arc<dyn PlaylistRepository>,
    pub edges: Arc<dyn EdgeRepository>,
}

impl Repositories {
    /// MongoDB 저장소를 만들고 각 컬렉션의 인덱스를 생성합니다
    pub async fn mongo(database: &Database) -> Result<Self, AppError> {
        let db = database.get_database();

        let users = MongoUserRepository::new(&db);
        let videos = MongoVideoRepository::new(&db);
        let tweets = MongoTweetRepository::new(&db);
        let comments = MongoCommentRepository::new(&db);
        let playlists = MongoPlaylistRepository::new(&db);
        let edges = MongoEdgeRepository::new(&db);

        users.create_indexes().await?;
        videos.create_indexes().await?;
        tweets.create_indexes().await?;
        comments.create_indexes().await?;
        playlists.create_indexes().await?;
        edges.create_indexes().await?;

        log::info!("✅ MongoDB 인덱스 생성 완료");

        Ok(Self {
            users: Arc::new(users),
            videos: Arc::new(videos),
            tweets: Arc::new(tweets),
            comments: Arc::new(comments),
            playlists: Arc::new(playlists),
            edges: Arc::new(edges),
        })
    }

    /// 메모리 저장소
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::InMemoryUserRepository::default()),
            videos: Arc::new(memory::InMemoryVideoRepository::default()),
            tweets: Arc::new(memory::InMemoryTweetRepository::default()),
            comments: Arc::new(memory::InMemoryCommentRepository::default()),
            playlists: Arc::new(memory::InMemoryPlaylistRepository::default()),
            edges: Arc::new(memory::InMemoryEdgeRepository::default()),
        }
    }
}

/// 유니크 인덱스 위반 여부
pub(crate) fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

pub(crate) fn db_error(err: MongoError) -> AppError {
    AppError::DatabaseError(err.to_string())
}

/// 집계 결과의 숫자 필드를 i64로 읽습니다 ($sum 결과는 Int32/Int64/Double 중 하나)
pub(crate) fn bson_to_i64(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(v)) => *v as i64,
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bson_to_i64_accepts_numeric_variants() {
        assert_eq!(bson_to_i64(Some(&Bson::Int32(3))), 3);
        assert_eq!(bson_to_i64(Some(&Bson::Int64(7))), 7);
        assert_eq!(bson_to_i64(Some(&Bson::Double(2.0))), 2);
        assert_eq!(bson_to_i64(Some(&Bson::String("x".into()))), 0);
        assert_eq!(bson_to_i64(None), 0);
    }
}
