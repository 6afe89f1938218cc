//! API DTOs (Data Transfer Objects)
//!
//! Request bodies default missing fields to empty so that they surface as
//! validation errors instead of extractor rejections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Comment, Page, Post};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Raw paging parameters; unparseable values fall back to the defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub comment_count: i64,
    pub has_comments: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.post_id.into_uuid(),
            author_id: post.author_id.into_uuid(),
            author_name: post.author_name,
            title: post.title,
            content: post.content,
            comment_count: post.counters.comment_count,
            has_comments: post.counters.has_comments,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Created post plus the author's adjusted counter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub author_post_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub items: Vec<PostResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

impl From<Page<Post>> for PostListResponse {
    fn from(page: Page<Post>) -> Self {
        Self {
            items: page.items.into_iter().map(PostResponse::from).collect(),
            page: page.page,
            page_size: page.page_size,
            total: page.total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            post_id: comment.post_id.into_uuid(),
            author_id: comment.author_id.into_uuid(),
            author_name: comment.author_name,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// Created comment plus the parent post's adjusted counters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub post_comment_count: i64,
    pub post_has_comments: bool,
}

/// Parent post counters after a comment deletion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCountersResponse {
    pub post_id: Uuid,
    pub comment_count: i64,
    pub has_comments: bool,
}
