//! Structural validation of a persisted snapshot against configuration
//!
//! This checks shape only: counts, ranges, name uniqueness and name
//! prefixes. It never re-derives generated values.

use super::PersistedSnapshot;
use crate::catalog::NamePrefix;
use crate::config::GeneratorConfig;

use std::collections::HashSet;
use std::fmt;

/// One structural check on a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCheck {
    /// Number of metrics equals `metrics.quantity`
    MetricQuantity,
    /// Every metric's series count is within `metrics.timeSeries`
    TimeSeriesPerMetric,
    /// Every series' label count is within `labels.perMetric`
    LabelsPerTimeSeries,
    /// Rotation catalog size equals `labels.qtyForValueRotation`
    RotationLabelQuantity,
    /// Label catalog size equals the `labels.perMetric` maximum
    LabelQuantity,
    /// First label's value count equals `labels.valueVariations`
    LabelValueVariations,
    /// First metric's prefix matches `metrics.prefix`
    MetricPrefix,
    /// First label's prefix matches `labels.prefix`
    LabelPrefix,
    /// No metric, label or rotation label name appears twice in its list
    UniqueNames,
    /// Rotation label names do not reuse main label names
    DisjointRotationLabels,
}

impl ShapeCheck {
    pub const ALL: [ShapeCheck; 10] = [
        ShapeCheck::MetricQuantity,
        ShapeCheck::LabelQuantity,
        ShapeCheck::LabelValueVariations,
        ShapeCheck::RotationLabelQuantity,
        ShapeCheck::TimeSeriesPerMetric,
        ShapeCheck::LabelsPerTimeSeries,
        ShapeCheck::MetricPrefix,
        ShapeCheck::LabelPrefix,
        ShapeCheck::UniqueNames,
        ShapeCheck::DisjointRotationLabels,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeCheck::MetricQuantity => "metric_quantity",
            ShapeCheck::TimeSeriesPerMetric => "time_series_per_metric",
            ShapeCheck::LabelsPerTimeSeries => "labels_per_time_series",
            ShapeCheck::RotationLabelQuantity => "rotation_label_quantity",
            ShapeCheck::LabelQuantity => "label_quantity",
            ShapeCheck::LabelValueVariations => "label_value_variations",
            ShapeCheck::MetricPrefix => "metric_prefix",
            ShapeCheck::LabelPrefix => "label_prefix",
            ShapeCheck::UniqueNames => "unique_names",
            ShapeCheck::DisjointRotationLabels => "disjoint_rotation_labels",
        }
    }

    fn passes(&self, snapshot: &PersistedSnapshot, config: &GeneratorConfig) -> bool {
        match self {
            ShapeCheck::MetricQuantity => snapshot.metrics.len() == config.metrics.quantity as usize,
            ShapeCheck::TimeSeriesPerMetric => snapshot
                .metrics
                .iter()
                .all(|(_, series)| config.metrics.time_series.contains(series.len())),
            ShapeCheck::LabelsPerTimeSeries => snapshot.metrics.iter().all(|(_, series)| {
                series
                    .iter()
                    .all(|ts| config.labels.per_metric.contains(ts.len()))
            }),
            // Exact equality: a snapshot generated with a different rotation
            // quantity is stale.
            ShapeCheck::RotationLabelQuantity => {
                snapshot.rotation_labels.len() == config.labels.qty_for_value_rotation as usize
            }
            ShapeCheck::LabelQuantity => {
                snapshot.labels.len() == config.labels.per_metric.max() as usize
            }
            ShapeCheck::LabelValueVariations => snapshot
                .labels
                .first()
                .is_some_and(|(_, values)| values.len() == config.labels.value_variations as usize),
            ShapeCheck::MetricPrefix => snapshot
                .metrics
                .first()
                .is_some_and(|(name, _)| NamePrefix::parse(name) == config.metrics.name_prefix()),
            ShapeCheck::LabelPrefix => snapshot
                .labels
                .first()
                .is_some_and(|(name, _)| NamePrefix::parse(name) == config.labels.name_prefix()),
            ShapeCheck::UniqueNames => {
                all_unique(snapshot.metrics.iter().map(|(name, _)| name))
                    && all_unique(snapshot.labels.iter().map(|(name, _)| name))
                    && all_unique(snapshot.rotation_labels.iter().map(|(name, _)| name))
            }
            ShapeCheck::DisjointRotationLabels => {
                let main: HashSet<&str> =
                    snapshot.labels.iter().map(|(name, _)| name.as_str()).collect();
                snapshot
                    .rotation_labels
                    .iter()
                    .all(|(name, _)| !main.contains(name.as_str()))
            }
        }
    }
}

fn all_unique<'a>(mut names: impl Iterator<Item = &'a String>) -> bool {
    let mut seen = HashSet::new();
    names.all(|name| seen.insert(name))
}

impl fmt::Display for ShapeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeReport {
    failed: Vec<ShapeCheck>,
}

impl ShapeReport {
    pub fn is_match(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed(&self) -> &[ShapeCheck] {
        &self.failed
    }

    pub fn failed_names(&self) -> Vec<String> {
        self.failed.iter().map(|c| c.as_str().to_string()).collect()
    }
}

/// Run every check and report the ones that failed
pub fn validate(snapshot: &PersistedSnapshot, config: &GeneratorConfig) -> ShapeReport {
    ShapeReport {
        failed: ShapeCheck::ALL
            .into_iter()
            .filter(|check| !check.passes(snapshot, config))
            .collect(),
    }
}

/// Whether `snapshot` can be reused under `config`; false when absent
pub fn matches(snapshot: Option<&PersistedSnapshot>, config: &GeneratorConfig) -> bool {
    snapshot.is_some_and(|snapshot| validate(snapshot, config).is_match())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TimeSeries;
    use crate::config::CountSpec;

    fn config() -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.metrics.quantity = 2;
        config.metrics.time_series = CountSpec::Range([1, 2]);
        config.labels.per_metric = CountSpec::Range([1, 2]);
        config.labels.value_variations = 2;
        config
    }

    fn series(pairs: &[(&str, &str)]) -> TimeSeries {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn snapshot() -> PersistedSnapshot {
        PersistedSnapshot {
            metrics: vec![
                ("fake__m1".into(), vec![series(&[("fake__a", "x")])]),
                (
                    "fake__m2".into(),
                    vec![
                        series(&[("fake__a", "x"), ("fake__b", "y")]),
                        series(&[("fake__b", "z")]),
                    ],
                ),
            ],
            labels: vec![
                ("fake__a".into(), vec!["x".into(), "w".into()]),
                ("fake__b".into(), vec!["y".into(), "z".into()]),
            ],
            rotation_labels: vec![],
        }
    }

    #[test]
    fn test_matching_snapshot() {
        let report = validate(&snapshot(), &config());
        assert!(report.is_match(), "{:?}", report.failed());
        assert!(matches(Some(&snapshot()), &config()));
    }

    #[test]
    fn test_absent_snapshot_never_matches() {
        assert!(!matches(None, &config()));
    }

    #[test]
    fn test_metric_quantity_mismatch() {
        let mut config = config();
        config.metrics.quantity = 3;
        let report = validate(&snapshot(), &config);
        assert_eq!(report.failed(), &[ShapeCheck::MetricQuantity]);
    }

    #[test]
    fn test_series_and_label_bounds() {
        let mut config = config();
        config.metrics.time_series = CountSpec::Fixed(1);
        config.labels.per_metric = CountSpec::Range([1, 1]);
        let report = validate(&snapshot(), &config);
        assert!(report.failed().contains(&ShapeCheck::TimeSeriesPerMetric));
        assert!(report.failed().contains(&ShapeCheck::LabelsPerTimeSeries));
        assert!(report.failed().contains(&ShapeCheck::LabelQuantity));
    }

    #[test]
    fn test_rotation_quantity_is_exact() {
        let mut config = config();
        config.labels.qty_for_value_rotation = 1;
        let report = validate(&snapshot(), &config);
        assert_eq!(report.failed(), &[ShapeCheck::RotationLabelQuantity]);

        let mut with_rotation = snapshot();
        with_rotation.rotation_labels = vec![("fake__r".into(), vec!["1".into(), "2".into()])];
        assert!(validate(&with_rotation, &config).is_match());
    }

    #[test]
    fn test_prefix_changes_are_detected() {
        let mut config = config();
        config.metrics.prefix = Some("other".into());
        config.labels.prefix = Some(String::new());
        let report = validate(&snapshot(), &config);
        assert_eq!(
            report.failed(),
            &[ShapeCheck::MetricPrefix, ShapeCheck::LabelPrefix]
        );
    }

    #[test]
    fn test_value_variation_mismatch() {
        let mut config = config();
        config.labels.value_variations = 3;
        assert_eq!(
            validate(&snapshot(), &config).failed(),
            &[ShapeCheck::LabelValueVariations]
        );
    }

    #[test]
    fn test_repeated_metric_name_is_rejected() {
        let mut repeated = snapshot();
        repeated.metrics[1].0 = "fake__m1".into();
        assert_eq!(
            validate(&repeated, &config()).failed(),
            &[ShapeCheck::UniqueNames]
        );
    }

    #[test]
    fn test_repeated_label_names_are_rejected() {
        let mut repeated = snapshot();
        repeated.labels[1].0 = "fake__a".into();
        assert_eq!(
            validate(&repeated, &config()).failed(),
            &[ShapeCheck::UniqueNames]
        );

        let mut config = config();
        config.labels.qty_for_value_rotation = 2;
        let mut rotation = snapshot();
        rotation.rotation_labels = vec![
            ("fake__r".into(), vec!["1".into(), "2".into()]),
            ("fake__r".into(), vec!["3".into(), "4".into()]),
        ];
        assert_eq!(
            validate(&rotation, &config).failed(),
            &[ShapeCheck::UniqueNames]
        );
    }

    #[test]
    fn test_rotation_label_overlapping_main_label_is_rejected() {
        let mut config = config();
        config.labels.qty_for_value_rotation = 1;
        let mut overlapping = snapshot();
        overlapping.rotation_labels = vec![("fake__a".into(), vec!["1".into(), "2".into()])];

        let report = validate(&overlapping, &config);
        assert_eq!(report.failed(), &[ShapeCheck::DisjointRotationLabels]);
        assert_eq!(report.failed_names(), vec!["disjoint_rotation_labels".to_string()]);
    }

    #[test]
    fn test_empty_snapshot_fails_without_panicking() {
        let report = validate(&PersistedSnapshot::default(), &config());
        assert!(!report.is_match());
        assert!(report.failed().contains(&ShapeCheck::LabelPrefix));
        assert!(report.failed().contains(&ShapeCheck::MetricPrefix));
    }
}
