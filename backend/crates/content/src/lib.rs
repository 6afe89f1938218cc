//! Content Backend Module
//!
//! Posts and comments with denormalized counters.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, counter rules, ownership policy, repository trait
//! - `application/` - Use cases, public queries, counter repair
//! - `infra/` - Postgres store, plus an in-memory double for tests
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Counter Model
//! - `User.post_count` counts the user's live posts
//! - `Post.comment_count` counts the post's live comments
//! - `Post.has_comments` is `comment_count > 0`, written in the same step
//!
//! Every child write and its parent counter adjustment form one atomic unit
//! in the store. A unit that would drive a counter below zero is rolled back
//! and reported as a consistency error; `RepairCountersUseCase` recounts.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{RepairCountersUseCase, SeedDemoDataUseCase, SeedReport};
pub use domain::consistency::RepairReport;
pub use domain::entities::{Comment, Post, PostCounters};
pub use domain::repository::ContentRepository;
pub use error::{ContentError, ContentResult};
pub use infra::PgContentRepository;
pub use presentation::router::{content_router, content_router_generic};
