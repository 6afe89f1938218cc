//! Infrastructure Layer

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::MemoryContentStore;
pub use postgres::PgContentRepository;
