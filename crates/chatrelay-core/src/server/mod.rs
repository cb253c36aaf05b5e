//! HTTP front door.
//!
//! Axum server with a permissive CORS policy and one route group mounted
//! under `/api/chat`:
//!
//!   POST /api/chat/completions
//!   GET  /api/chat/health

pub mod chat;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::provider::CompletionProvider;

/// Shared, read-only state handed to every handler.
pub struct AppContext {
    pub provider: Arc<dyn CompletionProvider>,
}

impl AppContext {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/chat/completions", post(chat::create_completion))
        .route("/api/chat/health", get(chat::health))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Bind `addr` and serve until the process is stopped.
///
/// Reached only after configuration loaded successfully, so a missing
/// credential can never bind a listening port.
pub async fn serve(ctx: Arc<AppContext>, addr: &str) -> anyhow::Result<()> {
    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("chatrelay listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
