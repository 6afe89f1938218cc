//! Register Use Case
//!
//! Creates a new user account with `post_count = 0`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        // Early, friendly conflict detection; `create` is still authoritative
        if self.repo.find_by_user_name(&user_name).await?.is_some() {
            return Err(AuthError::UserNameTaken);
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(user_name, email, password_hash);

        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id,
            user_name: user.user_name.original().to_string(),
            email: user.email.as_str().to_string(),
            post_count: user.post_count,
            created_at: user.created_at,
        })
    }
}
