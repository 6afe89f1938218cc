//! Authorization Gate
//!
//! Axum extractor that resolves the caller's identity from the
//! `Authorization: Bearer` header. Handlers that take [`CurrentUser`] are
//! rejected with 401 before their body runs, so no store access happens for
//! a missing, malformed, forged or expired token.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use platform::bearer::{BearerError, extract_bearer};

use crate::application::token::TokenService;
use crate::domain::entity::Identity;
use crate::error::AuthError;

/// Verified caller identity
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);
        let token = extract_bearer(&parts.headers)?;
        let identity = tokens.verify(token)?;
        Ok(CurrentUser(identity))
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => AuthError::TokenMissing,
            BearerError::Malformed => AuthError::TokenInvalid,
        }
    }
}
