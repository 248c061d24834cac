//! HTTP API: login, prompt submission and history over JSON.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::Container;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod types;

#[derive(Clone)]
pub struct AppState {
    pub container: Arc<Container>,
}

pub fn router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/", get(handlers::root))
        .route("/login/", post(handlers::login))
        .route("/prompt/", post(handlers::prompt))
        .route("/history/", get(handlers::history))
        // Same endpoints without the trailing slash
        .route("/login", post(handlers::login))
        .route("/prompt", post(handlers::prompt))
        .route("/history", get(handlers::history))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(AppState { container })
}

/// Serve the API until Ctrl-C.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(container))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
