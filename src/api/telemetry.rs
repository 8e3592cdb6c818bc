//! Request logging for the HTTP surface.

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{debug, info_span, warn, Instrument};

/// Wraps each request in a span and logs its status and latency.
pub async fn http_observability_middleware(req: Request<axum::body::Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let span = info_span!(
        "http.request",
        http.request.method = %method,
        http.route = %route
    );
    let response = next.run(req).instrument(span).await;
    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if status >= 400 {
        warn!(method = %method, route = %route, status, elapsed_ms, "HTTP request failed");
    } else {
        debug!(method = %method, route = %route, status, elapsed_ms, "HTTP request handled");
    }

    response
}
