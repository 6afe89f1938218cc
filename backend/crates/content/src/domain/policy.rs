//! Ownership rules
//!
//! - A post may be updated or deleted only by its author.
//! - A comment may be deleted by its author or by the author of its post.
//! - Anyone authenticated may comment on a live post.

use kernel::id::UserId;

use crate::domain::entities::{Comment, Post};

pub fn can_modify_post(post: &Post, caller: &UserId) -> bool {
    post.author_id == *caller
}

pub fn can_delete_comment(comment: &Comment, post_author: &UserId, caller: &UserId) -> bool {
    comment.author_id == *caller || post_author == caller
}
