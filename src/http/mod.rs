//! HTTP server for the Larder read API.
//!
//! Three GET endpoints over one shape: fetch a user's documents through the
//! store's coarse filter, re-check and reshape in memory, wrap into the
//! endpoint's payload.

mod handlers;

pub use handlers::router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::store::DocumentStore;

/// Shared application state for HTTP handlers
pub struct AppState {
    /// Store client constructed once at startup; handlers only borrow it.
    pub store: Arc<dyn DocumentStore>,
}

/// Run the HTTP server on the given port
pub async fn run_server(store: Arc<dyn DocumentStore>, port: u16) -> Result<()> {
    let state = Arc::new(AppState { store });
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Larder HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
