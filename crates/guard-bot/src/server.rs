//! Liveness HTTP server
//!
//! Keeps hosting platforms that expect a bound port happy and gives probes something to
//! hit. It reports process liveness only, not storage or platform health.

use std::future::Future;

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use guard_common::{AppError, AppResult};

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// GET /
async fn index() -> &'static str {
    "Bot is running..."
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Build the liveness router
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}

/// Serve the liveness router until `shutdown` resolves
pub async fn run_server<F>(address: String, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Liveness server listening on http://{}", address);

    axum::serve(listener, create_router())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(AppError::internal)?;

    Ok(())
}
