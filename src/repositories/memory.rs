//! 메모리 저장소
//!
//! MongoDB 구현과 같은 계약(유니크 제약, 조건부 갱신, 정렬 규칙)을 프로세스 메모리에서
//! 지킵니다. 각 연산은 하나의 락 구간 안에서 검사와 변경을 함께 수행합니다.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::{DateTime, oid::ObjectId};

use crate::core::errors::AppError;
use crate::domain::dto::PageRequest;
use crate::domain::entities::{Comment, Edge, EdgeKind, MediaAsset, Playlist, Tweet, User, Video};
use crate::repositories::{
    CommentRepository, EdgeRepository, OwnerVideoStats, PlaylistRepository, ProfileUpdate,
    TweetRepository, UserRepository, VideoFilter, VideoRepository, VideoSort, VideoSortField,
    VideoUpdate, WATCH_HISTORY_LIMIT,
};

fn lock_poisoned() -> AppError {
    AppError::InternalError("메모리 저장소 락 오염".to_string())
}

/// skip/limit 적용
fn paginate<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    let skip = usize::try_from(page.skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
    items.into_iter().skip(skip).take(limit).collect()
}

/// 최신순 (동일 시각이면 ID 역순)
fn newest_first(a: (&DateTime, &ObjectId), b: (&DateTime, &ObjectId)) -> Ordering {
    b.0.cmp(a.0).then_with(|| b.1.cmp(a.1))
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    fn update<F>(&self, id: &ObjectId, apply: F) -> Result<Option<User>, AppError>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;
        Ok(users.get_mut(id).map(|user| {
            apply(user);
            user.updated_at = DateTime::now();
            user.clone()
        }))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        Ok(users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        if users
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(AppError::ConflictError(
                "User with email or username already exists".to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: &ObjectId, update: ProfileUpdate) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        if let Some(email) = &update.email {
            if users.values().any(|u| &u.email == email && &u.id != id) {
                return Err(AppError::ConflictError("Email is already in use".to_string()));
            }
        }

        Ok(users.get_mut(id).map(|user| {
            if let Some(full_name) = update.full_name {
                user.full_name = full_name;
            }
            if let Some(email) = update.email {
                user.email = email;
            }
            user.updated_at = DateTime::now();
            user.clone()
        }))
    }

    async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        let updated = self.update(id, |user| user.password_hash = password_hash.to_string())?;
        Ok(updated.is_some())
    }

    async fn set_avatar(&self, id: &ObjectId, avatar: MediaAsset) -> Result<Option<User>, AppError> {
        self.update(id, |user| user.avatar = avatar)
    }

    async fn set_cover_image(&self, id: &ObjectId, cover: MediaAsset) -> Result<Option<User>, AppError> {
        self.update(id, |user| user.cover_image = Some(cover))
    }

    async fn set_refresh_token(&self, id: &ObjectId, token: Option<&str>) -> Result<bool, AppError> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;
        Ok(users
            .get_mut(id)
            .map(|user| user.refresh_token = token.map(str::to_string))
            .is_some())
    }

    async fn replace_refresh_token(&self, id: &ObjectId, expected: &str, new: &str) -> Result<bool, AppError> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        match users.get_mut(id) {
            Some(user) if user.refresh_token.as_deref() == Some(expected) => {
                user.refresh_token = Some(new.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn push_watch_history(&self, id: &ObjectId, video: &ObjectId) -> Result<(), AppError> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        if let Some(user) = users.get_mut(id) {
            user.watch_history.retain(|v| v != video);
            user.watch_history.insert(0, *video);
            user.watch_history.truncate(WATCH_HISTORY_LIMIT);
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// videos
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<ObjectId, Video>>,
}

impl InMemoryVideoRepository {
    fn update<F>(&self, id: &ObjectId, apply: F) -> Result<Option<Video>, AppError>
    where
        F: FnOnce(&mut Video),
    {
        let mut videos = self.videos.write().map_err(|_| lock_poisoned())?;
        Ok(videos.get_mut(id).map(|video| {
            apply(video);
            video.clone()
        }))
    }
}

fn compare_videos(a: &Video, b: &Video, sort: VideoSort) -> Ordering {
    let ordering = match sort.field {
        VideoSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        VideoSortField::Views => a.views.cmp(&b.views),
        VideoSortField::Duration => a.duration.partial_cmp(&b.duration).unwrap_or(Ordering::Equal),
        VideoSortField::Title => a.title.cmp(&b.title),
    }
    .then_with(|| a.id.cmp(&b.id));

    if sort.ascending { ordering } else { ordering.reverse() }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create(&self, video: Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().map_err(|_| lock_poisoned())?;
        videos.insert(video.id, video.clone());
        Ok(video)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Video>, AppError> {
        let videos = self.videos.read().map_err(|_| lock_poisoned())?;
        Ok(videos.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Video>, AppError> {
        let videos = self.videos.read().map_err(|_| lock_poisoned())?;
        Ok(ids.iter().filter_map(|id| videos.get(id).cloned()).collect())
    }

    async fn list(&self, filter: &VideoFilter, sort: VideoSort, page: PageRequest) -> Result<Vec<Video>, AppError> {
        let videos = self.videos.read().map_err(|_| lock_poisoned())?;

        let mut matched: Vec<Video> = videos.values().filter(|v| filter.matches(v)).cloned().collect();
        matched.sort_by(|a, b| compare_videos(a, b, sort));

        Ok(paginate(matched, page))
    }

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Video>, AppError> {
        let videos = self.videos.read().map_err(|_| lock_poisoned())?;

        let mut owned: Vec<Video> = videos.values().filter(|v| &v.owner == owner).cloned().collect();
        owned.sort_by(|a, b| newest_first((&a.created_at, &a.id), (&b.created_at, &b.id)));

        Ok(owned)
    }

    async fn update(&self, id: &ObjectId, update: VideoUpdate) -> Result<Option<Video>, AppError> {
        self.update(id, |video| {
            if let Some(title) = update.title {
                video.title = title;
            }
            if let Some(description) = update.description {
                video.description = description;
            }
            if let Some(thumbnail) = update.thumbnail {
                video.thumbnail = thumbnail;
            }
            video.updated_at = DateTime::now();
        })
    }

    async fn toggle_published(&self, id: &ObjectId) -> Result<Option<Video>, AppError> {
        self.update(id, |video| {
            video.is_published = !video.is_published;
            video.updated_at = DateTime::now();
        })
    }

    async fn increment_views(&self, id: &ObjectId) -> Result<Option<Video>, AppError> {
        self.update(id, |video| video.views += 1)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut videos = self.videos.write().map_err(|_| lock_poisoned())?;
        Ok(videos.remove(id).is_some())
    }

    async fn stats_for_owner(&self, owner: &ObjectId) -> Result<OwnerVideoStats, AppError> {
        let videos = self.videos.read().map_err(|_| lock_poisoned())?;

        Ok(videos
            .values()
            .filter(|v| &v.owner == owner)
            .fold(OwnerVideoStats::default(), |mut stats, video| {
                stats.total_videos += 1;
                stats.total_views += video.views;
                stats
            }))
    }
}

// ---------------------------------------------------------------------------
// tweets
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryTweetRepository {
    tweets: RwLock<HashMap<ObjectId, Tweet>>,
}

#[async_trait]
impl TweetRepository for InMemoryTweetRepository {
    async fn create(&self, tweet: Tweet) -> Result<Tweet, AppError> {
        let mut tweets = self.tweets.write().map_err(|_| lock_poisoned())?;
        tweets.insert(tweet.id, tweet.clone());
        Ok(tweet)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Tweet>, AppError> {
        let tweets = self.tweets.read().map_err(|_| lock_poisoned())?;
        Ok(tweets.get(id).cloned())
    }

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Tweet>, AppError> {
        let tweets = self.tweets.read().map_err(|_| lock_poisoned())?;

        let mut owned: Vec<Tweet> = tweets.values().filter(|t| &t.owner == owner).cloned().collect();
        owned.sort_by(|a, b| newest_first((&a.created_at, &a.id), (&b.created_at, &b.id)));

        Ok(owned)
    }

    async fn update_content(&self, id: &ObjectId, content: &str) -> Result<Option<Tweet>, AppError> {
        let mut tweets = self.tweets.write().map_err(|_| lock_poisoned())?;
        Ok(tweets.get_mut(id).map(|tweet| {
            tweet.content = content.to_string();
            tweet.updated_at = DateTime::now();
            tweet.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut tweets = self.tweets.write().map_err(|_| lock_poisoned())?;
        Ok(tweets.remove(id).is_some())
    }
}

// ---------------------------------------------------------------------------
// comments
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<HashMap<ObjectId, Comment>>,
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, AppError> {
        let mut comments = self.comments.write().map_err(|_| lock_poisoned())?;
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, AppError> {
        let comments = self.comments.read().map_err(|_| lock_poisoned())?;
        Ok(comments.get(id).cloned())
    }

    async fn list_by_video(&self, video: &ObjectId, page: PageRequest) -> Result<Vec<Comment>, AppError> {
        let comments = self.comments.read().map_err(|_| lock_poisoned())?;

        let mut matched: Vec<Comment> = comments.values().filter(|c| &c.video == video).cloned().collect();
        matched.sort_by(|a, b| newest_first((&a.created_at, &a.id), (&b.created_at, &b.id)));

        Ok(paginate(matched, page))
    }

    async fn update_content(&self, id: &ObjectId, content: &str) -> Result<Option<Comment>, AppError> {
        let mut comments = self.comments.write().map_err(|_| lock_poisoned())?;
        Ok(comments.get_mut(id).map(|comment| {
            comment.content = content.to_string();
            comment.updated_at = DateTime::now();
            comment.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut comments = self.comments.write().map_err(|_| lock_poisoned())?;
        Ok(comments.remove(id).is_some())
    }
}

// ---------------------------------------------------------------------------
// playlists
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryPlaylistRepository {
    playlists: RwLock<HashMap<ObjectId, Playlist>>,
}

#[async_trait]
impl PlaylistRepository for InMemoryPlaylistRepository {
    async fn create(&self, playlist: Playlist) -> Result<Playlist, AppError> {
        let mut playlists = self.playlists.write().map_err(|_| lock_poisoned())?;
        playlists.insert(playlist.id, playlist.clone());
        Ok(playlist)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Playlist>, AppError> {
        let playlists = self.playlists.read().map_err(|_| lock_poisoned())?;
        Ok(playlists.get(id).cloned())
    }

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Playlist>, AppError> {
        let playlists = self.playlists.read().map_err(|_| lock_poisoned())?;

        let mut owned: Vec<Playlist> = playlists.values().filter(|p| &p.owner == owner).cloned().collect();
        owned.sort_by(|a, b| newest_first((&a.created_at, &a.id), (&b.created_at, &b.id)));

        Ok(owned)
    }

    async fn update_details(
        &self,
        id: &ObjectId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Playlist>, AppError> {
        let mut playlists = self.playlists.write().map_err(|_| lock_poisoned())?;
        Ok(playlists.get_mut(id).map(|playlist| {
            if let Some(name) = name {
                playlist.name = name;
            }
            if let Some(description) = description {
                playlist.description = description;
            }
            playlist.updated_at = DateTime::now();
            playlist.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut playlists = self.playlists.write().map_err(|_| lock_poisoned())?;
        Ok(playlists.remove(id).is_some())
    }

    async fn add_video(&self, id: &ObjectId, video: &ObjectId) -> Result<Option<Playlist>, AppError> {
        let mut playlists = self.playlists.write().map_err(|_| lock_poisoned())?;

        match playlists.get_mut(id) {
            Some(playlist) if !playlist.contains(video) => {
                playlist.videos.push(*video);
                playlist.updated_at = DateTime::now();
                Ok(Some(playlist.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn remove_video(&self, id: &ObjectId, video: &ObjectId) -> Result<Option<Playlist>, AppError> {
        let mut playlists = self.playlists.write().map_err(|_| lock_poisoned())?;

        match playlists.get_mut(id) {
            Some(playlist) if playlist.contains(video) => {
                playlist.videos.retain(|v| v != video);
                playlist.updated_at = DateTime::now();
                Ok(Some(playlist.clone()))
            }
            _ => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// edges
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryEdgeRepository {
    edges: RwLock<HashMap<(ObjectId, ObjectId, EdgeKind), Edge>>,
}

impl InMemoryEdgeRepository {
    fn collect<P>(&self, predicate: P) -> Result<Vec<Edge>, AppError>
    where
        P: Fn(&Edge) -> bool,
    {
        let edges = self.edges.read().map_err(|_| lock_poisoned())?;

        let mut matched: Vec<Edge> = edges.values().filter(|e| predicate(e)).cloned().collect();
        matched.sort_by(|a, b| newest_first((&a.created_at, &a.id), (&b.created_at, &b.id)));

        Ok(matched)
    }
}

#[async_trait]
impl EdgeRepository for InMemoryEdgeRepository {
    async fn find(&self, actor: &ObjectId, target: &ObjectId, kind: EdgeKind) -> Result<Option<Edge>, AppError> {
        let edges = self.edges.read().map_err(|_| lock_poisoned())?;
        Ok(edges.get(&(*actor, *target, kind)).cloned())
    }

    async fn insert(&self, edge: Edge) -> Result<Edge, AppError> {
        let mut edges = self.edges.write().map_err(|_| lock_poisoned())?;
        let key = (edge.actor, edge.target, edge.kind);

        if edges.contains_key(&key) {
            return Err(AppError::ConflictError(format!("{} already exists", edge.kind.as_str())));
        }

        edges.insert(key, edge.clone());
        Ok(edge)
    }

    async fn delete(&self, edge: &Edge) -> Result<bool, AppError> {
        let mut edges = self.edges.write().map_err(|_| lock_poisoned())?;
        let key = (edge.actor, edge.target, edge.kind);

        match edges.get(&key) {
            Some(stored) if stored.id == edge.id => Ok(edges.remove(&key).is_some()),
            _ => Ok(false),
        }
    }

    async fn count_by_target(&self, target: &ObjectId, kind: EdgeKind) -> Result<u64, AppError> {
        Ok(self.collect(|e| &e.target == target && e.kind == kind)?.len() as u64)
    }

    async fn count_by_targets(&self, targets: &[ObjectId], kind: EdgeKind) -> Result<u64, AppError> {
        Ok(self.collect(|e| e.kind == kind && targets.contains(&e.target))?.len() as u64)
    }

    async fn count_by_actor(&self, actor: &ObjectId, kind: EdgeKind) -> Result<u64, AppError> {
        Ok(self.collect(|e| &e.actor == actor && e.kind == kind)?.len() as u64)
    }

    async fn list_by_target(&self, target: &ObjectId, kind: EdgeKind) -> Result<Vec<Edge>, AppError> {
        self.collect(|e| &e.target == target && e.kind == kind)
    }

    async fn list_by_actor(&self, actor: &ObjectId, kind: EdgeKind) -> Result<Vec<Edge>, AppError> {
        self.collect(|e| &e.actor == actor && e.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(kind: &str) -> MediaAsset {
        MediaAsset {
            url: format!("https://media.example/{}", kind),
            public_id: format!("streamhub/{}", kind),
            resource_type: kind.to_string(),
            duration: None,
        }
    }

    fn user(name: &str) -> User {
        User::new(name, &format!("{}@x.com", name), name, "hash".into(), asset("image"), None)
    }

    #[actix_web::test]
    async fn test_user_uniqueness_is_enforced() {
        let repo = InMemoryUserRepository::default();
        repo.create(user("alice")).await.unwrap();

        let result = repo.create(user("alice")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_refresh_token_swap_requires_expected_value() {
        let repo = InMemoryUserRepository::default();
        let alice = repo.create(user("alice")).await.unwrap();

        repo.set_refresh_token(&alice.id, Some("r1")).await.unwrap();
        assert!(repo.replace_refresh_token(&alice.id, "r1", "r2").await.unwrap());
        assert!(!repo.replace_refresh_token(&alice.id, "r1", "r3").await.unwrap());

        let stored = repo.find_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("r2"));
    }

    #[actix_web::test]
    async fn test_watch_history_moves_rewatched_video_to_front() {
        let repo = InMemoryUserRepository::default();
        let alice = repo.create(user("alice")).await.unwrap();
        let (v1, v2) = (ObjectId::new(), ObjectId::new());

        repo.push_watch_history(&alice.id, &v1).await.unwrap();
        repo.push_watch_history(&alice.id, &v2).await.unwrap();
        repo.push_watch_history(&alice.id, &v1).await.unwrap();

        let stored = repo.find_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored.watch_history, vec![v1, v2]);
    }

    #[actix_web::test]
    async fn test_playlist_add_and_remove_are_conditional() {
        let repo = InMemoryPlaylistRepository::default();
        let playlist = repo.create(Playlist::new(ObjectId::new(), "Mix", "")).await.unwrap();
        let video = ObjectId::new();

        assert!(repo.add_video(&playlist.id, &video).await.unwrap().is_some());
        assert!(repo.add_video(&playlist.id, &video).await.unwrap().is_none());
        assert!(repo.remove_video(&playlist.id, &video).await.unwrap().is_some());
        assert!(repo.remove_video(&playlist.id, &video).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_edge_insert_rejects_duplicates() {
        let repo = InMemoryEdgeRepository::default();
        let (actor, target) = (ObjectId::new(), ObjectId::new());

        let edge = repo.insert(Edge::new(actor, target, EdgeKind::VideoLike)).await.unwrap();
        let duplicate = repo.insert(Edge::new(actor, target, EdgeKind::VideoLike)).await;
        assert!(matches!(duplicate, Err(AppError::ConflictError(_))));

        // 종류가 다르면 별개의 엣지
        repo.insert(Edge::new(actor, target, EdgeKind::Subscription)).await.unwrap();
        assert_eq!(repo.count_by_target(&target, EdgeKind::VideoLike).await.unwrap(), 1);

        assert!(repo.delete(&edge).await.unwrap());
        assert!(!repo.delete(&edge).await.unwrap());
    }

    #[actix_web::test]
    async fn test_video_list_respects_visibility_and_sort() {
        let repo = InMemoryVideoRepository::default();
        let owner = ObjectId::new();

        let mut draft = Video::new(owner, "Draft", "", asset("video"), asset("image"));
        draft.is_published = false;
        let mut popular = Video::new(owner, "Popular", "", asset("video"), asset("image"));
        popular.views = 50;
        let quiet = Video::new(owner, "Quiet", "", asset("video"), asset("image"));

        for video in [draft, popular, quiet] {
            repo.create(video).await.unwrap();
        }

        let sort = VideoSort { field: VideoSortField::Views, ascending: false };
        let anonymous = repo.list(&VideoFilter::default(), sort, PageRequest::new(None, None)).await.unwrap();
        assert_eq!(anonymous.len(), 2);
        assert_eq!(anonymous[0].title, "Popular");

        let owner_view = VideoFilter { viewer: Some(owner), ..Default::default() };
        let all = repo.list(&owner_view, sort, PageRequest::new(None, None)).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
