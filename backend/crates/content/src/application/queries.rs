//! Public read queries
//!
//! No token required. Counters are returned as stored.

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entities::{Comment, Page, Post};
use crate::domain::repository::ContentRepository;
use crate::domain::value_objects::PageRequest;
use crate::error::{ContentError, ContentResult};

pub struct ContentQueries<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> ContentQueries<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_posts(&self, page: PageRequest) -> ContentResult<Page<Post>> {
        self.repo.list_posts(page).await
    }

    /// A live post with its live comments
    pub async fn get_post(&self, post_id: PostId) -> ContentResult<(Post, Vec<Comment>)> {
        let post = self
            .repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;
        let comments = self.repo.list_comments(&post_id).await?;
        Ok((post, comments))
    }

    pub async fn list_comments(&self, post_id: PostId) -> ContentResult<Vec<Comment>> {
        if self.repo.find_post(&post_id).await?.is_none() {
            return Err(ContentError::PostNotFound);
        }
        self.repo.list_comments(&post_id).await
    }
}
