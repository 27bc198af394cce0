//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다.
//!
//! ## 특징
//!
//! - **데이터 무결성**: email, username 유니크 인덱스
//! - **단일 세션 토큰**: 리프레시 토큰은 사용자 문서에 하나만 저장되며,
//!   교체는 기존 값을 조건으로 하는 원자적 갱신(compare-and-swap)으로 수행됩니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime, doc, oid::ObjectId, to_bson};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::{MediaAsset, User};
use crate::repositories::{db_error, is_duplicate_key};

/// 보관하는 시청 기록 최대 개수
pub const WATCH_HISTORY_LIMIT: usize = 100;

/// 프로필 변경 내용 (None인 필드는 유지)
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// 사용자 데이터 액세스 포트
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// 새 사용자 저장. email/username 중복이면 `ConflictError`
    async fn create(&self, user: User) -> Result<User, AppError>;

    /// 프로필 갱신. 변경 후 문서를 반환하며 email 중복이면 `ConflictError`
    async fn update_profile(&self, id: &ObjectId, update: ProfileUpdate) -> Result<Option<User>, AppError>;
    async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError>;
    async fn set_avatar(&self, id: &ObjectId, avatar: MediaAsset) -> Result<Option<User>, AppError>;
    async fn set_cover_image(&self, id: &ObjectId, cover: MediaAsset) -> Result<Option<User>, AppError>;

    /// 저장된 리프레시 토큰을 무조건 덮어씁니다 (None이면 제거)
    async fn set_refresh_token(&self, id: &ObjectId, token: Option<&str>) -> Result<bool, AppError>;

    /// 저장된 토큰이 `expected`와 같을 때만 `new`로 교체합니다
    ///
    /// 교체에 성공하면 true. 이미 다른 요청이 교체했거나 로그아웃된 경우 false.
    async fn replace_refresh_token(&self, id: &ObjectId, expected: &str, new: &str) -> Result<bool, AppError>;

    /// 시청 기록 맨 앞에 동영상을 추가합니다 (중복 제거, 최대 `WATCH_HISTORY_LIMIT`개)
    async fn push_watch_history(&self, id: &ObjectId, video: &ObjectId) -> Result<(), AppError>;
}

/// MongoDB `users` 컬렉션 구현
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        // 이메일 유니크 인덱스
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        // 사용자명 유니크 인덱스
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, username_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn find_one_and_set(
        &self,
        id: &ObjectId,
        set: mongodb::bson::Document,
    ) -> Result<Option<User>, AppError> {
        self.collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("Email is already in use".to_string())
                } else {
                    db_error(e)
                }
            })
    }
}

fn media_bson(asset: &MediaAsset) -> AppResult<mongodb::bson::Bson> {
    to_bson(asset).context("미디어 직렬화 실패")
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(db_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(db_error)
    }

    async fn create(&self, user: User) -> Result<User, AppError> {
        match self.collection.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(AppError::ConflictError(
                "User with email or username already exists".to_string(),
            )),
            Err(e) => Err(db_error(e)),
        }
    }

    async fn update_profile(&self, id: &ObjectId, update: ProfileUpdate) -> Result<Option<User>, AppError> {
        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(full_name) = update.full_name {
            set.insert("full_name", full_name);
        }
        if let Some(email) = update.email {
            set.insert("email", email);
        }

        self.find_one_and_set(id, set).await
    }

    async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        let result = self.collection
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "password_hash": password_hash, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(db_error)?;

        Ok(result.matched_count > 0)
    }

    async fn set_avatar(&self, id: &ObjectId, avatar: MediaAsset) -> Result<Option<User>, AppError> {
        let set = doc! { "avatar": media_bson(&avatar)?, "updated_at": DateTime::now() };
        self.find_one_and_set(id, set).await
    }

    async fn set_cover_image(&self, id: &ObjectId, cover: MediaAsset) -> Result<Option<User>, AppError> {
        let set = doc! { "cover_image": media_bson(&cover)?, "updated_at": DateTime::now() };
        self.find_one_and_set(id, set).await
    }

    async fn set_refresh_token(&self, id: &ObjectId, token: Option<&str>) -> Result<bool, AppError> {
        let update = match token {
            Some(token) => doc! { "$set": { "refresh_token": token } },
            None => doc! { "$unset": { "refresh_token": "" } },
        };

        let result = self.collection
            .update_one(doc! { "_id": *id }, update)
            .await
            .map_err(db_error)?;

        Ok(result.matched_count > 0)
    }

    async fn replace_refresh_token(&self, id: &ObjectId, expected: &str, new: &str) -> Result<bool, AppError> {
        let result = self.collection
            .update_one(
                doc! { "_id": *id, "refresh_token": expected },
                doc! { "$set": { "refresh_token": new } },
            )
            .await
            .map_err(db_error)?;

        Ok(result.modified_count > 0)
    }

    async fn push_watch_history(&self, id: &ObjectId, video: &ObjectId) -> Result<(), AppError> {
        // 기존 항목을 제거한 뒤 맨 앞에 추가하는 파이프라인 갱신
        let pipeline = vec![doc! {
            "$set": {
                "watch_history": {
                    "$slice": [
                        {
                            "$concatArrays": [
                                [*video],
                                {
                                    "$filter": {
                                        "input": { "$ifNull": ["$watch_history", []] },
                                        "cond": { "$ne": ["$$this", *video] }
                                    }
                                }
                            ]
                        },
                        WATCH_HISTORY_LIMIT as i32
                    ]
                }
            }
        }];

        self.collection
            .update_one(doc! { "_id": *id }, pipeline)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
