//! Infrastructure Layer
//!
//! Database implementations.

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::{MemoryUserRepository, UserTable};
pub use postgres::PgAuthRepository;
