//! In-Memory Repository Implementation
//!
//! Test double, compiled for this crate's tests and behind the `test-utils`
//! feature for dependents. `UserTable` is public so that other stores can
//! embed it under their own lock and keep users, posts and comments
//! consistent in one critical section.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserName};
use crate::error::{AuthError, AuthResult};

/// Users keyed by id with the same uniqueness rules as the `users` table
#[derive(Debug, Default)]
pub struct UserTable {
    users: HashMap<UserId, User>,
}

impl UserTable {
    /// Insert, enforcing unique canonical user name and email across all
    /// users, deactivated ones included
    pub fn insert(&mut self, user: User) -> AuthResult<()> {
        if self
            .users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical())
        {
            return Err(AuthError::UserNameTaken);
        }
        if self.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        self.users.insert(user.user_id, user);
        Ok(())
    }

    pub fn get(&self, user_id: &UserId) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn get_mut(&mut self, user_id: &UserId) -> Option<&mut User> {
        self.users.get_mut(user_id)
    }

    pub fn find_by_user_name(&self, user_name: &UserName) -> Option<&User> {
        self.users
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
    }

    pub fn find_by_email(&self, email: &Email) -> Option<&User> {
        self.users.values().find(|u| &u.email == email)
    }

    pub fn soft_delete(&mut self, user_id: &UserId) -> bool {
        match self.users.get_mut(user_id) {
            Some(user) if user.is_active() => {
                let now = Utc::now();
                user.deleted_at = Some(now);
                user.updated_at = now;
                true
            }
            _ => false,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }
}

/// In-memory credential store
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.table.write().await.insert(user.clone())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self.table.read().await.find_by_user_name(user_name).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.table.read().await.find_by_email(email).cloned())
    }

    async fn soft_delete(&self, user_id: &UserId) -> AuthResult<bool> {
        Ok(self.table.write().await.soft_delete(user_id))
    }
}
