//! Accounts Service - Main Application Entry Point
//!
//! This is a REST API server for personal-finance record keeping. It stores accounts and the
//! transactions booked against them, and answers every request with the same JSON envelope.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, or in-memory stores for local runs
//! - **Format**: JSON requests, JSON envelope responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the configured stores (creating the pool and running migrations for PostgreSQL)
//! 3. Build HTTP router with routes and middleware
//! 4. Serve on the configured port until Ctrl-C

mod config;
mod db;
mod envelope;
mod error;
mod extract;
mod handlers;
mod models;
mod routes;
mod state;
mod stores;
mod validation;

#[cfg(test)]
mod test_utils;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Config, StoreBackend},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().context("Could not load configuration")?;
    tracing::info!(backend = ?config.store_backend, "Configuration loaded");

    let state = build_state(&config).await?;

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .allowed_origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid ALLOWED_ORIGIN {:?}", config.allowed_origin))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let app = routes::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Could not bind to {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORE_BACKEND is postgres")?;

            let pool = db::create_pool(database_url, config.database_max_connections)
                .await
                .context("Could not connect to the database")?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool)
                .await
                .context("Could not run database migrations")?;
            tracing::info!("Database migrations complete");

            Ok(AppState::postgres(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on shutdown");
            Ok(AppState::in_memory())
        }
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Could not listen for shutdown signal");
        // Without a signal handler the server runs until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
