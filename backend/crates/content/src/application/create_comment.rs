//! Create Comment Use Case
//!
//! Any authenticated user may comment on a live post.

use std::sync::Arc;

use auth::Identity;
use kernel::id::PostId;

use crate::domain::entities::{Comment, PostCounters};
use crate::domain::repository::ContentRepository;
use crate::domain::value_objects::CommentBody;
use crate::error::ContentResult;

#[derive(Debug)]
pub struct CreateCommentOutput {
    pub comment: Comment,
    /// Parent post counters after this comment was counted
    pub counters: PostCounters,
}

pub struct CreateCommentUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> CreateCommentUseCase<R>
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
        content: String,
    ) -> ContentResult<CreateCommentOutput> {
        let content = CommentBody::new(content)?;

        let comment = Comment::new(post_id, caller.user_id, &caller.user_name, content);
        let counters = self.repo.create_comment(&comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %post_id,
            user_id = %caller.user_id,
            comment_count = counters.comment_count,
            "Comment created"
        );

        Ok(CreateCommentOutput { comment, counters })
    }
}
