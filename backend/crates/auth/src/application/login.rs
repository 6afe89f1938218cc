//! Login Use Case
//!
//! Verifies credentials and issues a bearer token.

use std::sync::{Arc, LazyLock};

use crate::application::config::AuthConfig;
use crate::application::token::{IssuedToken, TokenService};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Hash verified against when the user name is unknown, so both failure
/// paths cost one Argon2 verification.
static DUMMY_HASH: LazyLock<Option<UserPassword>> = LazyLock::new(|| {
    let raw = RawPassword::new("dummy-password-for-timing".to_string()).ok()?;
    UserPassword::from_raw(&raw, None).ok()
});

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            config,
            tokens,
        }
    }

    /// Unknown user, wrong password and deactivated account all yield
    /// `InvalidCredentials`. Only absent fields are a validation error.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<IssuedToken> {
        if input.user_name.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "User name and password are required".into(),
            ));
        }

        let raw_password = RawPassword::for_login(input.password);

        let user = match UserName::new(&input.user_name) {
            Ok(user_name) => self.repo.find_by_user_name(&user_name).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            if let Some(dummy) = DUMMY_HASH.as_ref() {
                let _ = dummy.verify(&raw_password, self.config.pepper());
            }
            return Err(AuthError::InvalidCredentials);
        };

        let password_ok = user
            .password_hash
            .verify(&raw_password, self.config.pepper());
        if !password_ok || !user.is_active() {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            expires_at_ms = issued.identity.expires_at_ms,
            "User logged in"
        );

        Ok(issued)
    }
}
