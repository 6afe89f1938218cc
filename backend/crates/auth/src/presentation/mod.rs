//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the authorization gate extractor.

pub mod dto;
pub mod extract;
pub mod gate;
pub mod handlers;
pub mod router;

pub use gate::CurrentUser;
pub use handlers::AuthAppState;
pub use router::{auth_router, auth_router_generic};
