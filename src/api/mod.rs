//! HTTP surface
//!
//! - `GET /metrics`: Prometheus text exposition, values refreshed per scrape
//! - `GET /`: liveness text
//! - `GET /health`, `GET /ready`: liveness and readiness checks

pub mod scrape;
mod telemetry;

use crate::exposition::Exposition;

use axum::Router;
use std::sync::Arc;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// HTTP port
    pub http_port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            http_port: 5000,
            enable_cors: true,
        }
    }
}

/// Build the HTTP router
pub fn build_http_router(exposition: Arc<Exposition>, config: &ApiServerConfig) -> Router {
    use axum::middleware;
    use axum::routing::get;
    use tower_http::cors::{Any, CorsLayer};

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/metrics", get(scrape::handle_scrape))
        .with_state(ApiState { exposition })
        .layer(middleware::from_fn(telemetry::http_observability_middleware));

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Shared API state
#[derive(Clone)]
pub struct ApiState {
    pub exposition: Arc<Exposition>,
}

async fn root() -> &'static str {
    "Hello!"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check endpoint. The data set is built before the server
/// starts listening, so a running server is always ready.
async fn ready_check() -> &'static str {
    "READY"
}
