//! Label value rotation wired to a live exposition

use synthmetrics::config::CountSpec;
use synthmetrics::rotation::{RotatedOverlay, RotationScheduler, RotationTarget};
use synthmetrics::{Dataset, Exposition, GeneratorConfig};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn setup(rotation: u32, seed: u64) -> (Arc<Dataset>, Arc<Exposition>) {
    let mut config = GeneratorConfig::default();
    config.metrics.quantity = 3;
    config.metrics.time_series = CountSpec::Range([1, 2]);
    config.labels.per_metric = CountSpec::Range([1, 2]);
    config.labels.value_variations = 4;
    config.labels.qty_for_value_rotation = rotation;

    let mut rng = StdRng::seed_from_u64(seed);
    let dataset = Arc::new(Dataset::generate(&config, &mut rng).unwrap());
    let exposition = Arc::new(
        Exposition::new(
            dataset.clone(),
            RotatedOverlay::empty(),
            false,
            StdRng::seed_from_u64(seed + 1),
        )
        .unwrap(),
    );
    (dataset, exposition)
}

fn sample_count(exposition: &Exposition) -> usize {
    exposition
        .render()
        .unwrap()
        .lines()
        .filter(|l| !l.starts_with('#') && !l.is_empty())
        .count()
}

#[test]
fn test_disabled_rotation_arms_nothing_and_exports_no_overlay() {
    let (dataset, exposition) = setup(0, 401);
    let target: Arc<dyn RotationTarget> = exposition.clone();
    let armed = RotationScheduler::arm(
        "0 */6 * * *",
        dataset.clone(),
        target,
        StdRng::seed_from_u64(402),
    )
    .unwrap();
    assert!(armed.is_none());

    exposition.refresh();
    assert!(exposition.overlay().is_empty());
    assert_eq!(dataset.exported_label_names().len(), dataset.labels().len());
    assert_eq!(sample_count(&exposition), dataset.series_count());
}

#[test]
fn test_tick_swaps_overlay_and_resets_series() {
    let (dataset, exposition) = setup(2, 403);
    let target: Arc<dyn RotationTarget> = exposition.clone();
    let mut scheduler = RotationScheduler::arm(
        "0 */6 * * *",
        dataset.clone(),
        target,
        StdRng::seed_from_u64(404),
    )
    .unwrap()
    .unwrap();

    exposition.refresh();
    assert_eq!(sample_count(&exposition), dataset.series_count());

    scheduler.tick();
    assert_eq!(sample_count(&exposition), 0);

    let overlay = exposition.overlay();
    assert_eq!(overlay.len(), 2);
    for (label, value) in overlay.iter() {
        let values = dataset.rotation().get(label).unwrap();
        assert!(values.iter().any(|v| v == value));
    }
}

#[tokio::test]
async fn test_scheduler_fires_on_schedule() {
    let (dataset, exposition) = setup(1, 405);
    let target: Arc<dyn RotationTarget> = exposition.clone();
    // Six-field expression: every second.
    let scheduler = RotationScheduler::arm(
        "* * * * * *",
        dataset,
        target,
        StdRng::seed_from_u64(406),
    )
    .unwrap()
    .unwrap();

    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    let fired = tokio::time::timeout(Duration::from_secs(5), async {
        while exposition.overlay().is_empty() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await;
    assert!(fired.is_ok(), "rotation never fired");

    shutdown.cancel();
    handle.await.unwrap();
}

#[test]
fn test_invalid_schedule_is_rejected_by_config() {
    let json = r#"{
        "metrics": { "quantity": 1, "timeSeries": 1 },
        "labels": {
            "perMetric": 1,
            "valueVariations": 1,
            "qtyForValueRotation": 1,
            "rotationCronSchedule": "whenever"
        }
    }"#;
    assert!(GeneratorConfig::from_json(json).is_err());
}
