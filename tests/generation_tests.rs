//! Generation properties over the public API
//!
//! - Catalog sizes and value vocabularies
//! - Series and label counts within configured bounds
//! - Content-distinct series under each metric
//! - Rotation catalog disjoint from the main catalog
//! - Bounded retries on impossible configurations

use synthmetrics::config::CountSpec;
use synthmetrics::generator::{build_label_catalog, build_metric_catalog, build_rotation_catalog};
use synthmetrics::{Dataset, Error, GeneratorConfig};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn config() -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.metrics.quantity = 12;
    config.metrics.time_series = CountSpec::Range([2, 6]);
    config.labels.per_metric = CountSpec::Range([1, 4]);
    config.labels.value_variations = 4;
    config.labels.qty_for_value_rotation = 3;
    config
}

#[test]
fn test_label_catalog_has_target_size_and_distinct_values() {
    let config = config();
    let mut rng = StdRng::seed_from_u64(101);
    let labels = build_label_catalog(&config, &HashSet::new(), &mut rng).unwrap();

    assert_eq!(labels.len(), 4);
    for (name, values) in labels.iter() {
        assert!(name.starts_with("fake__"), "unexpected label name {name}");
        let distinct: HashSet<_> = values.iter().collect();
        assert_eq!(values.len(), 4);
        assert_eq!(distinct.len(), 4, "values of {name} are not distinct");
    }
}

#[test]
fn test_series_and_label_counts_within_bounds() {
    let config = config();
    let mut rng = StdRng::seed_from_u64(102);
    let labels = build_label_catalog(&config, &HashSet::new(), &mut rng).unwrap();
    let metrics = build_metric_catalog(&config, &labels, &mut rng).unwrap();

    assert_eq!(metrics.len(), 12);
    for (metric, series_list) in metrics.iter() {
        assert!(
            config.metrics.time_series.contains(series_list.len()),
            "{metric} has {} series",
            series_list.len()
        );
        for series in series_list {
            assert!(config.labels.per_metric.contains(series.len()));
            for (label, value) in series.iter() {
                let values = labels.get(label).expect("series uses a catalog label");
                assert!(values.iter().any(|v| v == value));
            }
        }
    }
}

#[test]
fn test_series_are_content_distinct() {
    let config = config();
    let mut rng = StdRng::seed_from_u64(103);
    let dataset = Dataset::generate(&config, &mut rng).unwrap();

    for (metric, series_list) in dataset.metrics().iter() {
        let keys: HashSet<String> = series_list.iter().map(|s| s.canonical_key()).collect();
        assert_eq!(keys.len(), series_list.len(), "duplicate series under {metric}");
    }
}

#[test]
fn test_rotation_catalog_is_disjoint_from_main() {
    let config = config();
    let mut rng = StdRng::seed_from_u64(104);
    let labels = build_label_catalog(&config, &HashSet::new(), &mut rng).unwrap();
    let rotation = build_rotation_catalog(&config, &labels, &mut rng).unwrap();

    assert_eq!(rotation.len(), 3);
    for name in rotation.names() {
        assert!(!labels.contains(name), "{name} is in both catalogs");
    }
}

#[test]
fn test_rotation_disabled_yields_empty_catalog() {
    let mut config = config();
    config.labels.qty_for_value_rotation = 0;
    let mut rng = StdRng::seed_from_u64(105);

    let dataset = Dataset::generate(&config, &mut rng).unwrap();
    assert!(dataset.rotation().is_empty());
    assert_eq!(dataset.exported_label_names().len(), dataset.labels().len());
}

#[test]
fn test_impossible_series_count_exhausts_retries() {
    let mut config = GeneratorConfig::default();
    config.metrics.quantity = 1;
    // One label with two values allows only two distinct series.
    config.metrics.time_series = CountSpec::Fixed(5);
    config.labels.per_metric = CountSpec::Fixed(1);
    config.labels.value_variations = 2;
    config.max_attempts = Some(50);

    let mut rng = StdRng::seed_from_u64(106);
    let err = Dataset::generate(&config, &mut rng).unwrap_err();
    assert!(
        matches!(err, Error::GenerationExhausted { attempts: 50, .. }),
        "unexpected error: {err}"
    );
    assert!(!err.is_recoverable());
}

#[test]
fn test_same_seed_generates_same_dataset() {
    let config = config();
    let first = Dataset::generate(&config, &mut StdRng::seed_from_u64(107)).unwrap();
    let second = Dataset::generate(&config, &mut StdRng::seed_from_u64(107)).unwrap();
    assert_eq!(first, second);
}
