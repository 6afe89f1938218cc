//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod deactivate;
pub mod login;
pub mod register;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use deactivate::DeactivateUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{IssuedToken, TokenService};
