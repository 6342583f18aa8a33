//! HTTP endpoints for monitoring.
//!
//! - `GET /metrics`: Prometheus text format
//! - `GET /health`: 200 while the RCON session is open, 503 otherwise

use crate::link::Link;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;

async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

async fn health_handler(State(link): State<Arc<Link>>) -> (StatusCode, &'static str) {
    if link.bridge().is_connected() {
        (StatusCode::OK, "ok\n")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "rcon disconnected\n")
    }
}

/// Router serving the monitoring endpoints for `link`.
pub fn router(link: Arc<Link>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(link)
}

/// Serve the monitoring endpoints on an already bound listener.
pub async fn serve(listener: tokio::net::TcpListener, link: Arc<Link>) {
    if let Err(e) = axum::serve(listener, router(link)).await {
        tracing::error!(error = %e, "Monitoring server error");
    }
}

/// Bind `0.0.0.0:port` and serve the monitoring endpoints.
///
/// Long-running; spawn it in the background.
pub async fn run_http_server(port: u16, link: Arc<Link>) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!(%addr, "Monitoring HTTP server listening");
            serve(listener, link).await;
        }
        Err(e) => tracing::error!(%addr, error = %e, "Failed to bind monitoring server"),
    }
}
