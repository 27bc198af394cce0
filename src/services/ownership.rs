//! 소유자 범위 변경 공통 절차
//!
//! 모든 콘텐츠 변경은 같은 순서를 따릅니다.
//! ID 파싱(400) → 조회(404) → 소유자 확인(403) → 변경 → 갱신된 결과 반환.

use std::collections::HashMap;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::dto::OwnerSummary;
use crate::domain::entities::Owned;
use crate::repositories::UserRepository;

/// 경로 파라미터를 ObjectId로 변환합니다
///
/// 실패하면 `Invalid <label> ID` 메시지의 400 에러를 반환합니다.
pub fn parse_object_id(raw: &str, label: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::ValidationError(format!("Invalid {} ID", label)))
}

/// 조회 결과가 없으면 404
pub fn require_found<T>(found: Option<T>, label: &str) -> Result<T, AppError> {
    found.ok_or_else(|| AppError::NotFound(format!("{} not found", capitalize(label))))
}

/// 요청 사용자가 엔티티 소유자인지 확인합니다
pub fn ensure_owner<T: Owned>(entity: &T, actor: &ObjectId, label: &str) -> Result<(), AppError> {
    if entity.owner_id() != actor {
        log::warn!("소유자 아님: actor={} owner={} ({})", actor, entity.owner_id(), label);
        return Err(AppError::AuthorizationError(format!(
            "You are not allowed to modify this {}",
            label
        )));
    }
    Ok(())
}

/// 작성자 요약 일괄 조회
///
/// 사용자 레코드가 없는 작성자는 ID만 채운 요약으로 대체됩니다.
pub async fn owner_summaries(
    users: &Arc<dyn UserRepository>,
    owners: &[ObjectId],
) -> Result<HashMap<ObjectId, OwnerSummary>, AppError> {
    let mut unique = owners.to_vec();
    unique.sort();
    unique.dedup();

    let found = users.find_by_ids(&unique).await?;
    let mut summaries: HashMap<ObjectId, OwnerSummary> = found
        .iter()
        .map(|user| (user.id, OwnerSummary::from(user)))
        .collect();

    for id in unique {
        summaries
            .entry(id)
            .or_insert_with(|| OwnerSummary::unknown(id.to_hex()));
    }

    Ok(summaries)
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Tweet;

    #[test]
    fn test_parse_object_id_rejects_garbage() {
        let err = parse_object_id("not-an-id", "video").unwrap_err();
        assert_eq!(err.public_message(), "Invalid video ID");

        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "video").unwrap(), id);
    }

    #[test]
    fn test_ensure_owner() {
        let owner = ObjectId::new();
        let tweet = Tweet::new(owner, "hello");

        assert!(ensure_owner(&tweet, &owner, "tweet").is_ok());
        assert!(matches!(
            ensure_owner(&tweet, &ObjectId::new(), "tweet"),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_require_found_message() {
        let err = require_found::<()>(None, "playlist").unwrap_err();
        assert_eq!(err.public_message(), "Playlist not found");
    }
}
