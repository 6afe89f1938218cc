//! Deactivate Account Use Case
//!
//! Soft-deletes the caller's user record. Posts, comments and every
//! counter are left untouched; the user name and email stay reserved.

use std::sync::Arc;

use crate::domain::entity::Identity;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct DeactivateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeactivateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, caller: &Identity) -> AuthResult<()> {
        if !self.repo.soft_delete(&caller.user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %caller.user_id, "User deactivated");
        Ok(())
    }
}
