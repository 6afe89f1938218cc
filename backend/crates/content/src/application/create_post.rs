//! Create Post Use Case

use std::sync::Arc;

use auth::Identity;

use crate::domain::entities::Post;
use crate::domain::repository::ContentRepository;
use crate::domain::value_objects::{PostBody, PostTitle};
use crate::error::ContentResult;

pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

#[derive(Debug)]
pub struct CreatePostOutput {
    pub post: Post,
    /// Author's post count after this post was counted
    pub author_post_count: i64,
}

pub struct CreatePostUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePostUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &Identity,
        input: CreatePostInput,
    ) -> ContentResult<CreatePostOutput> {
        let title = PostTitle::new(&input.title)?;
        let content = PostBody::new(input.content)?;

        let post = Post::new(caller.user_id, &caller.user_name, title, content);
        let author_post_count = self.repo.create_post(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            user_id = %caller.user_id,
            post_count = author_post_count,
            "Post created"
        );

        Ok(CreatePostOutput {
            post,
            author_post_count,
        })
    }
}
