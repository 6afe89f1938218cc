//! Repository Traits
//!
//! Credential Store contract. Implementations live in the infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::User;
use crate::domain::value_object::{Email, UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    ///
    /// Must fail with `UserNameTaken` / `EmailTaken` when the canonical user
    /// name or email collides with any existing user, deactivated or not.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by canonical user name (including deactivated users)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Find user by email (including deactivated users)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Mark the user deactivated; returns false if already deactivated or absent
    async fn soft_delete(&self, user_id: &UserId) -> AuthResult<bool>;
}
