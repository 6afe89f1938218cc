//! Delete Post Use Case
//!
//! Soft-deletes a post and decrements its author's post count in the same
//! unit. Comments of the post and its comment count are left as they are.

use std::sync::Arc;

use auth::Identity;
use kernel::id::PostId;

use crate::domain::policy;
use crate::domain::repository::ContentRepository;
use crate::error::{ContentError, ContentResult};

pub struct DeletePostUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the author's post count after the deletion
    pub async fn execute(&self, caller: &Identity, post_id: PostId) -> ContentResult<i64> {
        let post = self
            .repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        if !policy::can_modify_post(&post, &caller.user_id) {
            return Err(ContentError::NotPostOwner);
        }

        let post_count = self.repo.soft_delete_post(&post_id).await?;

        tracing::info!(
            post_id = %post_id,
            user_id = %caller.user_id,
            post_count,
            "Post deleted"
        );
        Ok(post_count)
    }
}
