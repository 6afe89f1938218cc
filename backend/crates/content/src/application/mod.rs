//! Application Layer
//!
//! Use cases. Each mutating use case runs the ownership check, validates
//! input, then invokes exactly one atomic repository unit.

pub mod create_comment;
pub mod create_post;
pub mod delete_comment;
pub mod delete_post;
pub mod queries;
pub mod repair;
pub mod seed;
pub mod update_post;

// Re-exports
pub use create_comment::{CreateCommentOutput, CreateCommentUseCase};
pub use create_post::{CreatePostInput, CreatePostOutput, CreatePostUseCase};
pub use delete_comment::{DeleteCommentOutput, DeleteCommentUseCase};
pub use delete_post::DeletePostUseCase;
pub use queries::ContentQueries;
pub use repair::RepairCountersUseCase;
pub use seed::{SeedDemoDataUseCase, SeedReport};
pub use update_post::{UpdatePostInput, UpdatePostUseCase};
