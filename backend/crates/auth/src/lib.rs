//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the token service
//! - `infra/` - Postgres store, plus an in-memory double behind `test-utils`
//! - `presentation/` - HTTP handlers, DTOs, router, authorization gate
//!
//! ## Features
//! - Registration with unique user name and email
//! - Login issuing stateless HMAC-SHA256 bearer tokens
//! - Account deactivation (soft delete)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id plus optional pepper
//! - Login failures are indistinguishable (unknown user vs wrong password)
//! - Tokens are tamper-evident and time-bounded; no revocation

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{IssuedToken, TokenService};
pub use domain::entity::{Identity, User};
pub use domain::repository::UserRepository;
pub use error::{AuthError, AuthResult};
pub use infra::PgAuthRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use infra::{MemoryUserRepository, UserTable};
pub use presentation::gate::CurrentUser;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
