//! Token Service
//!
//! Issues and verifies stateless bearer tokens:
//!
//! ```text
//! base64url(JSON claims) "." base64url(HMAC-SHA256(secret, first segment))
//! ```
//!
//! Claims carry `sub` (user id), `name` (user name) and `iat` / `nbf` / `exp`
//! in Unix milliseconds. There is no server-side session store, so a token
//! stays valid until it expires.

use chrono::Utc;
use hmac::{Hmac, Mac};
use kernel::id::UserId;
use platform::crypto::{from_base64url, to_base64url};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::{Identity, User};
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    name: String,
    iat: i64,
    nbf: i64,
    exp: i64,
}

/// A freshly issued token and the identity it asserts
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub identity: Identity,
}

/// Token issuing and verification
pub struct TokenService {
    secret: [u8; 32],
    ttl_ms: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.token_secret,
            ttl_ms: config.token_ttl_ms(),
        }
    }

    /// Issue a token for a user, valid from now for the configured lifetime
    pub fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        self.issue_at(
            user.user_id,
            user.user_name.original(),
            Utc::now().timestamp_millis(),
        )
    }

    pub fn issue_at(&self, user_id: UserId, user_name: &str, now_ms: i64) -> AuthResult<IssuedToken> {
        let claims = Claims {
            sub: user_id.into_uuid(),
            name: user_name.to_string(),
            iat: now_ms,
            nbf: now_ms,
            exp: now_ms.saturating_add(self.ttl_ms),
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("Failed to encode claims: {e}")))?;
        let payload_b64 = to_base64url(&payload);
        let signature = self.mac(payload_b64.as_bytes())?.finalize().into_bytes();

        Ok(IssuedToken {
            token: format!("{}.{}", payload_b64, to_base64url(&signature)),
            identity: Identity {
                user_id,
                user_name: claims.name,
                issued_at_ms: claims.iat,
                expires_at_ms: claims.exp,
            },
        })
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> AuthResult<Identity> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    /// Verify signature first, then the time window
    pub fn verify_at(&self, token: &str, now_ms: i64) -> AuthResult<Identity> {
        let (payload_b64, signature_b64) = token.split_once('.').ok_or(AuthError::TokenInvalid)?;
        if signature_b64.contains('.') {
            return Err(AuthError::TokenInvalid);
        }

        let signature = from_base64url(signature_b64).map_err(|_| AuthError::TokenInvalid)?;
        // Constant-time comparison
        self.mac(payload_b64.as_bytes())?
            .verify_slice(&signature)
            .map_err(|_| AuthError::TokenInvalid)?;

        let payload = from_base64url(payload_b64).map_err(|_| AuthError::TokenInvalid)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)?;

        if claims.exp <= now_ms {
            return Err(AuthError::TokenExpired);
        }
        if claims.nbf > now_ms || claims.iat > now_ms {
            return Err(AuthError::TokenInvalid);
        }

        Ok(Identity {
            user_id: UserId::from_uuid(claims.sub),
            user_name: claims.name,
            issued_at_ms: claims.iat,
            expires_at_ms: claims.exp,
        })
    }

    fn mac(&self, data: &[u8]) -> AuthResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AuthError::Internal(format!("Invalid token secret: {e}")))?;
        mac.update(data);
        Ok(mac)
    }
}
