//! Presentation Layer
//!
//! HTTP handlers, DTOs and router for posts and comments.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::ContentAppState;
pub use router::{content_router, content_router_generic};
