//! Prometheus scrape endpoint

use crate::api::ApiState;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Assign fresh values to every series and render the registry
///
/// GET /metrics
pub async fn handle_scrape(State(state): State<ApiState>) -> Response {
    match state.exposition.scrape() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, state.exposition.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
