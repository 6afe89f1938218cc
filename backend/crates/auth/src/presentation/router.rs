//! Auth Router

use axum::{
    Router,
    routing::{delete, post},
};
use std::sync::Arc;

use crate::application::{AuthConfig, TokenService};
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig, tokens: Arc<TokenService>) -> Router {
    auth_router_generic(repo, config, tokens)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig, tokens: Arc<TokenService>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        tokens,
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/users/me", delete(handlers::deactivate::<R>))
        .with_state(state)
}
