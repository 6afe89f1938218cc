//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    DeactivateUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, TokenService,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::presentation::extract::JsonBody;
use crate::presentation::gate::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> FromRef<AuthAppState<R>> for Arc<TokenService>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &AuthAppState<R>) -> Self {
        state.tokens.clone()
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: output.user_id.into_uuid(),
            username: output.user_name,
            email: output.email,
            post_count: output.post_count,
            created_at: output.created_at,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let issued = use_case
        .execute(LoginInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer",
        user_id: issued.identity.user_id.into_uuid(),
        username: issued.identity.user_name,
        issued_at: issued.identity.issued_at_ms,
        expires_at: issued.identity.expires_at_ms,
    }))
}

// ============================================================================
// Deactivate
// ============================================================================

/// DELETE /api/users/me
pub async fn deactivate<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(caller): CurrentUser,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    DeactivateUseCase::new(state.repo.clone())
        .execute(&caller)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
