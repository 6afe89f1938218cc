//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Random signing keys and Base64 helpers
//! - Password hashing (Argon2id)
//! - Bearer token extraction from `Authorization` headers

pub mod bearer;
pub mod crypto;
pub mod password;
