//! In-Memory Store (tests only)
//!
//! Holds users, posts and comments behind one lock. Each atomic unit takes
//! the write lock once, validates everything, then applies all changes, so
//! a failed unit leaves no trace. Implements both the credential store and
//! the content store so one instance can back the whole API in tests.

use std::collections::HashMap;
use std::sync::Arc;

use auth::{AuthResult, User, UserRepository, UserTable};
use auth::domain::value_object::{Email, UserName};
use chrono::Utc;
use kernel::id::{CommentId, PostId, UserId};
use tokio::sync::RwLock;

use crate::domain::consistency::{self, CounterEvent, PostRepair, UserRepair};
use crate::domain::entities::{Comment, Page, Post, PostCounters};
use crate::domain::repository::ContentRepository;
use crate::domain::value_objects::{PageRequest, PostBody, PostTitle};
use crate::error::{ContentError, ContentResult};

#[derive(Debug, Default)]
struct State {
    users: UserTable,
    posts: HashMap<PostId, Post>,
    comments: HashMap<CommentId, Comment>,
}

impl State {
    fn active_user_mut(&mut self, user_id: &UserId) -> ContentResult<&mut User> {
        self.users
            .get_mut(user_id)
            .filter(|u| u.is_active())
            .ok_or(ContentError::AuthorInactive)
    }

    fn live_post_mut(&mut self, post_id: &PostId) -> ContentResult<&mut Post> {
        self.posts
            .get_mut(post_id)
            .filter(|p| p.is_live())
            .ok_or(ContentError::PostNotFound)
    }

    /// Display name of a user, as the Postgres reads join it
    fn author_name(&self, user_id: &UserId) -> Option<String> {
        self.users
            .get(user_id)
            .map(|u| u.user_name.original().to_string())
    }

    fn read_post(&self, post: &Post) -> Post {
        let mut post = post.clone();
        if let Some(name) = self.author_name(&post.author_id) {
            post.author_name = name;
        }
        post
    }

    fn read_comment(&self, comment: &Comment) -> Comment {
        let mut comment = comment.clone();
        if let Some(name) = self.author_name(&comment.author_id) {
            comment.author_name = name;
        }
        comment
    }

    fn live_comment_count(&self, post_id: &PostId) -> i64 {
        self.comments
            .values()
            .filter(|c| c.post_id == *post_id && c.is_live())
            .count() as i64
    }

    fn live_post_count(&self, user_id: &UserId) -> i64 {
        self.posts
            .values()
            .filter(|p| p.author_id == *user_id && p.is_live())
            .count() as i64
    }
}

/// In-memory users + content store
#[derive(Clone, Default)]
pub struct MemoryContentStore {
    state: Arc<RwLock<State>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite stored post counters without touching comments
    pub(crate) async fn force_post_counters(&self, post_id: &PostId, counters: PostCounters) {
        if let Some(post) = self.state.write().await.posts.get_mut(post_id) {
            post.counters = counters;
        }
    }

    /// Overwrite a stored user post count without touching posts
    pub(crate) async fn force_post_count(&self, user_id: &UserId, post_count: i64) {
        if let Some(user) = self.state.write().await.users.get_mut(user_id) {
            user.post_count = post_count;
        }
    }
}

// ============================================================================
// Content Store
// ============================================================================

impl ContentRepository for MemoryContentStore {
    async fn create_post(&self, post: &Post) -> ContentResult<i64> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        if state.posts.contains_key(&post.post_id) {
            return Err(ContentError::DuplicateId);
        }
        let author = state.active_user_mut(&post.author_id)?;
        let post_count = consistency::adjust(author.post_count, CounterEvent::PostCreated)
            .map_err(|d| ContentError::drift("user", post.author_id.into_uuid(), d))?;

        author.post_count = post_count;
        state.posts.insert(post.post_id, post.clone());
        Ok(post_count)
    }

    async fn update_post(
        &self,
        post_id: &PostId,
        title: &PostTitle,
        content: &PostBody,
    ) -> ContentResult<Post> {
        let mut state = self.state.write().await;
        let post = state.live_post_mut(post_id)?;
        post.title = title.as_str().to_string();
        post.content = content.as_str().to_string();
        post.updated_at = Utc::now();
        let updated = post.clone();
        Ok(state.read_post(&updated))
    }

    async fn soft_delete_post(&self, post_id: &PostId) -> ContentResult<i64> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let post = state
            .posts
            .get_mut(post_id)
            .filter(|p| p.is_live())
            .ok_or(ContentError::PostNotFound)?;
        let author = state
            .users
            .get_mut(&post.author_id)
            .ok_or(ContentError::UserNotFound)?;
        let post_count = consistency::adjust(author.post_count, CounterEvent::PostDeleted)
            .map_err(|d| ContentError::drift("user", post.author_id.into_uuid(), d))?;

        let now = Utc::now();
        post.deleted_at = Some(now);
        post.updated_at = now;
        author.post_count = post_count;
        Ok(post_count)
    }

    async fn create_comment(&self, comment: &Comment) -> ContentResult<PostCounters> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        if state.comments.contains_key(&comment.comment_id) {
            return Err(ContentError::DuplicateId);
        }
        state.active_user_mut(&comment.author_id)?;
        let post = state.live_post_mut(&comment.post_id)?;
        let counters = post
            .counters
            .apply(CounterEvent::CommentCreated)
            .map_err(|d| ContentError::drift("post", comment.post_id.into_uuid(), d))?;

        post.counters = counters;
        state.comments.insert(comment.comment_id, comment.clone());
        Ok(counters)
    }

    async fn soft_delete_comment(&self, comment_id: &CommentId) -> ContentResult<PostCounters> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let comment = state
            .comments
            .get_mut(comment_id)
            .filter(|c| c.is_live())
            .ok_or(ContentError::CommentNotFound)?;
        // Counters of deleted posts still track their live comments
        let post = state
            .posts
            .get_mut(&comment.post_id)
            .ok_or(ContentError::PostNotFound)?;
        let counters = post
            .counters
            .apply(CounterEvent::CommentDeleted)
            .map_err(|d| ContentError::drift("post", comment.post_id.into_uuid(), d))?;

        comment.deleted_at = Some(Utc::now());
        post.counters = counters;
        Ok(counters)
    }

    async fn find_post(&self, post_id: &PostId) -> ContentResult<Option<Post>> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .get(post_id)
            .filter(|p| p.is_live())
            .map(|p| state.read_post(p)))
    }

    async fn find_post_author(&self, post_id: &PostId) -> ContentResult<Option<UserId>> {
        let state = self.state.read().await;
        Ok(state.posts.get(post_id).map(|p| p.author_id))
    }

    async fn find_comment(&self, comment_id: &CommentId) -> ContentResult<Option<Comment>> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .get(comment_id)
            .filter(|c| c.is_live())
            .map(|c| state.read_comment(c)))
    }

    async fn list_posts(&self, page: PageRequest) -> ContentResult<Page<Post>> {
        let state = self.state.read().await;
        let mut live: Vec<&Post> = state.posts.values().filter(|p| p.is_live()).collect();
        live.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.post_id.as_uuid().cmp(b.post_id.as_uuid()))
        });

        let total = live.len() as i64;
        let items = live
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|p| state.read_post(p))
            .collect();

        Ok(Page {
            items,
            page: page.page(),
            page_size: page.page_size(),
            total,
        })
    }

    async fn list_comments(&self, post_id: &PostId) -> ContentResult<Vec<Comment>> {
        let state = self.state.read().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.post_id == *post_id && c.is_live())
            .map(|c| state.read_comment(c))
            .collect();
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.comment_id.as_uuid().cmp(b.comment_id.as_uuid()))
        });
        Ok(comments)
    }

    async fn user_post_count(&self, user_id: &UserId) -> ContentResult<Option<i64>> {
        let state = self.state.read().await;
        Ok(state.users.get(user_id).map(|u| u.post_count))
    }

    async fn repair_post(&self, post_id: &PostId) -> ContentResult<Option<PostRepair>> {
        let mut state = self.state.write().await;
        let live_comments = state.live_comment_count(post_id);
        let Some(post) = state.posts.get_mut(post_id) else {
            return Ok(None);
        };

        let before = post.counters;
        let after = PostCounters::recount(live_comments);
        if before != after {
            post.counters = after;
        }
        Ok(Some(PostRepair {
            post_id: *post_id,
            before,
            after,
        }))
    }

    async fn repair_user(&self, user_id: &UserId) -> ContentResult<Option<UserRepair>> {
        let mut state = self.state.write().await;
        let live_posts = state.live_post_count(user_id);
        let Some(user) = state.users.get_mut(user_id) else {
            return Ok(None);
        };

        let before = user.post_count;
        user.post_count = live_posts;
        Ok(Some(UserRepair {
            user_id: *user_id,
            before,
            after: live_posts,
        }))
    }

    async fn all_post_ids(&self) -> ContentResult<Vec<PostId>> {
        Ok(self.state.read().await.posts.keys().copied().collect())
    }

    async fn all_user_ids(&self) -> ContentResult<Vec<UserId>> {
        Ok(self.state.read().await.users.ids().collect())
    }
}

// ============================================================================
// Credential Store
// ============================================================================

impl UserRepository for MemoryContentStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.state.write().await.users.insert(user.clone())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .state
            .read()
            .await
            .users
            .find_by_user_name(user_name)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.state.read().await.users.find_by_email(email).cloned())
    }

    async fn soft_delete(&self, user_id: &UserId) -> AuthResult<bool> {
        Ok(self.state.write().await.users.soft_delete(user_id))
    }
}
