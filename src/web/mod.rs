//! HTTP surface
//!
//! | Method & Path | Purpose |
//! |---|---|
//! | GET `/` | Home page with the latest 50 records |
//! | GET `/sample` | Download the sample CSV |
//! | GET `/export` | Download every record as CSV |
//! | POST `/upload` | Import a CSV (multipart field `file`) |
//! | GET `/health` | Liveness check |

pub mod error;
pub mod handlers;
pub mod render;

pub use error::WebError;
pub use render::Views;

use crate::core::CustomerStore;
use crate::types::ImportError;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Default ceiling on request bodies (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Listener settings, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: CustomerStore,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(store: CustomerStore) -> Result<Self, ImportError> {
        Ok(Self {
            store,
            views: Arc::new(Views::new()?),
        })
    }
}

/// Build the application router
///
/// Request bodies larger than `max_upload_bytes` are refused with 413.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/sample", get(handlers::sample))
        .route("/export", get(handlers::export))
        .route("/upload", post(handlers::upload))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(config: &ServerConfig, store: CustomerStore) -> Result<(), ImportError> {
    let state = AppState::new(store.clone())?;
    let app = router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, max_upload_bytes = config.max_upload_bytes, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
