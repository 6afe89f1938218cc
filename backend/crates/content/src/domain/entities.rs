//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::value_objects::{CommentBody, PostBody, PostTitle};

/// Derived state a post carries about its comments
///
/// `has_comments == (comment_count > 0)` after every write; the only way to
/// change it is [`PostCounters::apply`] or [`PostCounters::recount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostCounters {
    pub comment_count: i64,
    pub has_comments: bool,
}

/// Post entity
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub author_id: UserId,
    /// Display name of the author, resolved on every read
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub counters: PostCounters,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// New post with no comments
    pub fn new(
        author_id: UserId,
        author_name: impl Into<String>,
        title: PostTitle,
        content: PostBody,
    ) -> Self {
        let now = Utc::now();
        Self {
            post_id: PostId::new(),
            author_id,
            author_name: author_name.into(),
            title: title.into_inner(),
            content: content.into_inner(),
            counters: PostCounters::default(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Comment entity
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(
        post_id: PostId,
        author_id: UserId,
        author_name: impl Into<String>,
        content: CommentBody,
    ) -> Self {
        Self {
            comment_id: CommentId::new(),
            post_id,
            author_id,
            author_name: author_name.into(),
            content: content.into_inner(),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A page of results, newest first
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}
