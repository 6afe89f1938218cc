//! Content Router

use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use auth::TokenService;

use crate::domain::repository::ContentRepository;
use crate::infra::postgres::PgContentRepository;
use crate::presentation::handlers::{self, ContentAppState};

/// Create the Content router with PostgreSQL repository
pub fn content_router(repo: PgContentRepository, tokens: Arc<TokenService>) -> Router {
    content_router_generic(repo, tokens)
}

/// Create a generic Content router for any repository implementation
pub fn content_router_generic<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let state = ContentAppState {
        repo: Arc::new(repo),
        tokens,
    };

    Router::new()
        .route(
            "/posts",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route(
            "/posts/{id}",
            get(handlers::get_post::<R>)
                .put(handlers::update_post::<R>)
                .delete(handlers::delete_post::<R>),
        )
        .route(
            "/posts/{id}/comments",
            get(handlers::list_comments::<R>).post(handlers::create_comment::<R>),
        )
        .route("/comments/{id}", delete(handlers::delete_comment::<R>))
        .with_state(state)
}
