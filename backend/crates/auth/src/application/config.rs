//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at process
//! start and passed by value into `TokenService` and the use cases.

use std::time::Duration;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing key for bearer tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Token lifetime (24 hours by default)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

/// Token lifetime when none is configured
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

impl AuthConfig {
    /// Config with the given signing secret, default lifetime and no pepper
    pub fn new(token_secret: [u8; 32]) -> Self {
        Self {
            token_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }

    /// Config with a random signing secret
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_random_secret() -> Self {
        Self::new(platform::crypto::random_key())
    }

    /// Get token TTL in milliseconds
    pub fn token_ttl_ms(&self) -> i64 {
        i64::try_from(self.token_ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new([3u8; 32]);
        assert_eq!(config.token_ttl_ms(), 86_400_000);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::with_random_secret()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("REDACTED"));
        // Vec<u8> Debug would print the raw bytes
        assert!(!debug.contains("112, 101"));
    }
}
