//! HTTP surface: router, shared state, and the serve loop.
//!
//! Four stateless routes compose the access guard, log fetcher, diagnoser
//! and fix mapper. All state is the immutable startup configuration plus a
//! cloneable upstream client; there is no cross-request mutable state.

pub mod handlers;

use crate::config::Config;
use crate::error::Result;
use crate::render::RenderClient;
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Shared per-request state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub render: RenderClient,
}

impl AppState {
    /// Build state with a client against the production Render API.
    pub fn new(config: Config) -> Result<Self> {
        let render = RenderClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            render,
        })
    }

    /// Build state with a caller-supplied client. Tests use this to point
    /// the fetcher at a local upstream stand-in.
    pub fn with_client(config: Config, render: RenderClient) -> Self {
        Self {
            config: Arc::new(config),
            render,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/logs", get(handlers::fetch_logs))
        .route("/debug", post(handlers::debug))
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .with_state(state)
}

/// Bind `0.0.0.0:{port}` and serve until ctrl-c.
pub async fn serve(config: Config) -> Result<()> {
    let port = config.port;
    let state = AppState::new(config)?;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "logdoctor listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("shutdown signal received");
}
