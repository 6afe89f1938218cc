//! Delete Comment Use Case
//!
//! The comment's author or the post's author may delete a comment.

use std::sync::Arc;

use auth::Identity;
use kernel::id::{CommentId, PostId};

use crate::domain::entities::PostCounters;
use crate::domain::policy;
use crate::domain::repository::ContentRepository;
use crate::error::{ContentError, ContentResult};

#[derive(Debug)]
pub struct DeleteCommentOutput {
    pub post_id: PostId,
    /// Parent post counters after the deletion
    pub counters: PostCounters,
}

pub struct DeleteCommentUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteCommentUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &Identity,
        comment_id: CommentId,
    ) -> ContentResult<DeleteCommentOutput> {
        let comment = self
            .repo
            .find_comment(&comment_id)
            .await?
            .ok_or(ContentError::CommentNotFound)?;

        let post_author = self
            .repo
            .find_post_author(&comment.post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        if !policy::can_delete_comment(&comment, &post_author, &caller.user_id) {
            return Err(ContentError::NotCommentOwner);
        }

        let counters = self.repo.soft_delete_comment(&comment_id).await?;

        tracing::info!(
            comment_id = %comment_id,
            post_id = %comment.post_id,
            user_id = %caller.user_id,
            comment_count = counters.comment_count,
            has_comments = counters.has_comments,
            "Comment deleted"
        );
        Ok(DeleteCommentOutput {
            post_id: comment.post_id,
            counters,
        })
    }
}
