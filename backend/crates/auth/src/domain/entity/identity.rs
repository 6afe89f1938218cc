//! Identity Entity
//!
//! The verified payload of a bearer token. Produced only by
//! `TokenService::verify` or by issuing a token for a user.

use kernel::id::UserId;

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub user_name: String,
    /// Unix milliseconds
    pub issued_at_ms: i64,
    /// Unix milliseconds
    pub expires_at_ms: i64,
}

impl Identity {
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at_ms <= now_ms
    }
}
