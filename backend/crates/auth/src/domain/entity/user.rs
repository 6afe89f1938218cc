//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{Email, UserName, UserPassword};

/// User entity
///
/// `post_count` is a denormalized counter owned by the content crate's
/// atomic write units; nothing in this crate changes it.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
    pub password_hash: UserPassword,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the account is deactivated
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user with zero posts
    pub fn new(user_name: UserName, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password_hash,
            post_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Deactivated users cannot log in or write
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}
