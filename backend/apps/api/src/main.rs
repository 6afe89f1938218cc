//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.
//!
//! `api --seed` loads demo accounts and posts into an empty database
//! before serving.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{PgAuthRepository, TokenService, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use content::{PgContentRepository, RepairCountersUseCase, SeedDemoDataUseCase, content_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,content=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations completed");

    let content_repo = PgContentRepository::new(pool.clone());
    let tokens = Arc::new(TokenService::new(&config.auth));

    if std::env::args().skip(1).any(|arg| arg == "--seed") {
        let report = SeedDemoDataUseCase::new(
            Arc::new(PgAuthRepository::new(pool.clone())),
            Arc::new(content_repo.clone()),
            Arc::new(config.auth.clone()),
            tokens.clone(),
        )
        .execute()
        .await
        .context("Failed to load demo data")?;
        tracing::info!(?report, "Seed step finished");
    }

    // Startup reconciliation: recount denormalized counters
    // Errors here should not prevent server startup
    match RepairCountersUseCase::new(Arc::new(content_repo.clone()))
        .repair_all()
        .await
    {
        Ok(report) if report.is_clean() => {
            tracing::info!("Counters consistent at startup");
        }
        Ok(report) => {
            tracing::warn!(
                posts_corrected = report.posts_corrected.len(),
                users_corrected = report.users_corrected.len(),
                "Counter drift corrected at startup"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Counter reconciliation failed, continuing anyway"
            );
        }
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let api = Router::new()
        .merge(auth_router(
            PgAuthRepository::new(pool.clone()),
            config.auth.clone(),
            tokens.clone(),
        ))
        .merge(content_router(content_repo, tokens));

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = config.listen_addr;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
