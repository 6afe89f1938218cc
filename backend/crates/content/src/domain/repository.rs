//! Repository Traits
//!
//! Content Store contract. Every mutating method is one atomic unit: the
//! child write and the parent counter adjustment commit together or not at
//! all, and counter changes are applied against the current stored value.

use kernel::id::{CommentId, PostId, UserId};

use crate::domain::consistency::{PostRepair, UserRepair};
use crate::domain::entities::{Comment, Page, Post, PostCounters};
use crate::domain::value_objects::{PageRequest, PostBody, PostTitle};
use crate::error::ContentResult;

#[trait_variant::make(ContentRepository: Send)]
pub trait LocalContentRepository {
    // ------------------------------------------------------------------------
    // Atomic write units
    // ------------------------------------------------------------------------

    /// Insert `post` and apply `PostCreated` to its author
    ///
    /// Fails with `AuthorInactive` if the author is missing or deactivated.
    /// Returns the author's post count after the adjustment.
    async fn create_post(&self, post: &Post) -> ContentResult<i64>;

    /// Replace title and content of a live post
    async fn update_post(
        &self,
        post_id: &PostId,
        title: &PostTitle,
        content: &PostBody,
    ) -> ContentResult<Post>;

    /// Mark a live post deleted and apply `PostDeleted` to its author
    ///
    /// Only the live-to-deleted transition adjusts the counter; a repeated
    /// call fails with `PostNotFound`. Returns the author's post count.
    async fn soft_delete_post(&self, post_id: &PostId) -> ContentResult<i64>;

    /// Insert `comment` and apply `CommentCreated` to its live parent post
    ///
    /// Fails with `PostNotFound` if the post is missing or deleted, and with
    /// `AuthorInactive` if the commenter is missing or deactivated.
    async fn create_comment(&self, comment: &Comment) -> ContentResult<PostCounters>;

    /// Mark a live comment deleted and apply `CommentDeleted` to its post
    async fn soft_delete_comment(&self, comment_id: &CommentId) -> ContentResult<PostCounters>;

    // ------------------------------------------------------------------------
    // Reads (counters are read, never recomputed)
    // ------------------------------------------------------------------------

    /// Live post by id
    async fn find_post(&self, post_id: &PostId) -> ContentResult<Option<Post>>;

    /// Author of a post, deleted or not
    async fn find_post_author(&self, post_id: &PostId) -> ContentResult<Option<UserId>>;

    /// Live comment by id
    async fn find_comment(&self, comment_id: &CommentId) -> ContentResult<Option<Comment>>;

    /// Live posts, newest first
    async fn list_posts(&self, page: PageRequest) -> ContentResult<Page<Post>>;

    /// Live comments of a post, newest first
    async fn list_comments(&self, post_id: &PostId) -> ContentResult<Vec<Comment>>;

    /// Stored post count of a user
    async fn user_post_count(&self, user_id: &UserId) -> ContentResult<Option<i64>>;

    // ------------------------------------------------------------------------
    // Repair
    // ------------------------------------------------------------------------

    /// Recount live comments of a post and overwrite its counters
    async fn repair_post(&self, post_id: &PostId) -> ContentResult<Option<PostRepair>>;

    /// Recount live posts of a user and overwrite `post_count`
    async fn repair_user(&self, user_id: &UserId) -> ContentResult<Option<UserRepair>>;

    async fn all_post_ids(&self) -> ContentResult<Vec<PostId>>;

    async fn all_user_ids(&self) -> ContentResult<Vec<UserId>>;
}
