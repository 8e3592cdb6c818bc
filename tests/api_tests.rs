//! HTTP surface tests, driven in-process through the router

use synthmetrics::api::{build_http_router, ApiServerConfig};
use synthmetrics::config::CountSpec;
use synthmetrics::rotation::{RotatedOverlay, RotationTarget};
use synthmetrics::{Dataset, Exposition, GeneratorConfig};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tower::ServiceExt;

fn config(rotation: u32) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.metrics.quantity = 5;
    config.metrics.time_series = CountSpec::Range([1, 3]);
    config.labels.per_metric = CountSpec::Range([1, 3]);
    config.labels.value_variations = 3;
    config.labels.qty_for_value_rotation = rotation;
    config
}

fn exposition(rotation: u32, seed: u64) -> Arc<Exposition> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dataset = Arc::new(Dataset::generate(&config(rotation), &mut rng).unwrap());
    let overlay = RotatedOverlay::draw(dataset.rotation(), &mut rng);
    Arc::new(Exposition::new(dataset, overlay, false, StdRng::seed_from_u64(seed + 1)).unwrap())
}

fn router(exposition: Arc<Exposition>) -> Router {
    build_http_router(exposition, &ApiServerConfig::default())
}

async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

fn samples(body: &str) -> Vec<&str> {
    body.lines().filter(|l| !l.starts_with('#') && !l.is_empty()).collect()
}

#[tokio::test]
async fn test_root_says_hello() {
    let (status, _, body) = get(router(exposition(0, 301)), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello!");
}

#[tokio::test]
async fn test_health_and_ready() {
    let exposition = exposition(0, 303);
    let (status, _, body) = get(router(exposition.clone()), "/health").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "OK"));
    let (status, _, body) = get(router(exposition), "/ready").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "READY"));
}

#[tokio::test]
async fn test_scrape_exposes_every_series() {
    let exposition = exposition(0, 305);
    let expected = exposition.dataset().series_count();

    let (status, content_type, body) = get(router(exposition.clone()), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; version=0.0.4"));
    assert_eq!(samples(&body).len(), expected);
    for name in exposition.dataset().metrics().names() {
        assert!(body.contains(&format!("# TYPE {name} gauge")), "missing {name}");
    }
}

#[tokio::test]
async fn test_scrape_values_change_between_requests() {
    let exposition = exposition(0, 307);
    let (_, _, first) = get(router(exposition.clone()), "/metrics").await;
    let (_, _, second) = get(router(exposition), "/metrics").await;
    assert_eq!(samples(&first).len(), samples(&second).len());
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_scrape_after_rotation_uses_new_overlay() {
    let exposition = exposition(2, 309);
    get(router(exposition.clone()), "/metrics").await;

    let mut rng = StdRng::seed_from_u64(311);
    let overlay = RotatedOverlay::draw(exposition.dataset().rotation(), &mut rng);
    exposition.apply_rotation(overlay.clone());

    let (_, _, body) = get(router(exposition.clone()), "/metrics").await;
    assert_eq!(samples(&body).len(), exposition.dataset().series_count());
    for line in samples(&body) {
        for (label, value) in overlay.iter() {
            assert!(line.contains(&format!("{label}=\"{value}\"")), "{line}");
        }
    }
}

#[tokio::test]
async fn test_cors_headers_present() {
    let response = router(exposition(0, 313))
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .header(header::ORIGIN, "http://dashboard.local")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
