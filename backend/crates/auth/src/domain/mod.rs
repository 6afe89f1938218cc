//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{Identity, User};
pub use repository::UserRepository;
