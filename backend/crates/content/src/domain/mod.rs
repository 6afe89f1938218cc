//! Domain Layer
//!
//! Entities, value objects, counter rules, ownership policy and the
//! repository contract.

pub mod consistency;
pub mod entities;
pub mod policy;
pub mod repository;
pub mod value_objects;

pub use consistency::{CounterEvent, PostRepair, RepairReport, UserRepair};
pub use entities::{Comment, Page, Post, PostCounters};
pub use repository::ContentRepository;
