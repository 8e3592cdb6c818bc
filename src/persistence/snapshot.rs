//! Serialized form of the three catalogs

use crate::catalog::{LabelCatalog, MetricCatalog, TimeSeries};

use serde::{Deserialize, Serialize};

/// Durable snapshot of generated data.
///
/// Serialized as ordered `[name, value]` pairs so catalog order survives a
/// round trip:
///
/// ```json
/// {
///   "metrics": [["fake__a", [{"fake__l": "v"}]]],
///   "labels": [["fake__l", ["v", "w"]]],
///   "rotationLabels": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    #[serde(default)]
    pub metrics: Vec<(String, Vec<TimeSeries>)>,
    #[serde(default)]
    pub labels: Vec<(String, Vec<String>)>,
    #[serde(default)]
    pub rotation_labels: Vec<(String, Vec<String>)>,
}

impl PersistedSnapshot {
    pub fn from_catalogs(
        metrics: &MetricCatalog,
        labels: &LabelCatalog,
        rotation: &LabelCatalog,
    ) -> Self {
        Self {
            metrics: metrics
                .iter()
                .map(|(name, series)| (name.to_string(), series.clone()))
                .collect(),
            labels: entries(labels),
            rotation_labels: entries(rotation),
        }
    }

    /// Split into `(metrics, labels, rotation)` catalogs
    pub fn into_catalogs(self) -> (MetricCatalog, LabelCatalog, LabelCatalog) {
        (
            MetricCatalog::from_entries(self.metrics),
            LabelCatalog::from_entries(self.labels),
            LabelCatalog::from_entries(self.rotation_labels),
        )
    }
}

fn entries(catalog: &LabelCatalog) -> Vec<(String, Vec<String>)> {
    catalog
        .iter()
        .map(|(name, values)| (name.to_string(), values.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "metrics": [["fake__m", [{"fake__b": "y", "fake__a": "x"}]]],
            "labels": [["fake__b", ["y"]], ["fake__a", ["x"]]]
        }"#;
        let snapshot: PersistedSnapshot = serde_json::from_str(json).unwrap();

        assert!(snapshot.rotation_labels.is_empty());
        assert_eq!(snapshot.labels[0].0, "fake__b");
        assert_eq!(snapshot.metrics[0].1[0].get("fake__a"), Some("x"));

        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("rotationLabels").unwrap().as_array().unwrap().is_empty());
    }

    #[test]
    fn test_catalog_order_survives() {
        let labels = LabelCatalog::from_entries(vec![
            ("z".to_string(), vec!["1".to_string()]),
            ("a".to_string(), vec!["2".to_string()]),
        ]);
        let snapshot =
            PersistedSnapshot::from_catalogs(&MetricCatalog::new(), &labels, &LabelCatalog::new());
        let (_, restored, _) = snapshot.into_catalogs();
        assert_eq!(restored, labels);
    }
}
