//! Update Post Use Case
//!
//! Replaces title and content. Counters are not touched.

use std::sync::Arc;

use auth::Identity;
use kernel::id::PostId;

use crate::domain::entities::Post;
use crate::domain::policy;
use crate::domain::repository::ContentRepository;
use crate::domain::value_objects::{PostBody, PostTitle};
use crate::error::{ContentError, ContentResult};

pub struct UpdatePostInput {
    pub title: String,
    pub content: String,
}

pub struct UpdatePostUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> UpdatePostUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &Identity,
        post_id: PostId,
        input: UpdatePostInput,
    ) -> ContentResult<Post> {
        let post = self
            .repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        if !policy::can_modify_post(&post, &caller.user_id) {
            return Err(ContentError::NotPostOwner);
        }

        let title = PostTitle::new(&input.title)?;
        let content = PostBody::new(input.content)?;

        let updated = self.repo.update_post(&post_id, &title, &content).await?;

        tracing::info!(post_id = %post_id, user_id = %caller.user_id, "Post updated");
        Ok(updated)
    }
}
