//! Startup data set: load a valid snapshot or generate fresh catalogs

use crate::catalog::{LabelCatalog, MetricCatalog};
use crate::config::GeneratorConfig;
use crate::generator::{build_label_catalog, build_metric_catalog, build_rotation_catalog};
use crate::persistence::{validate, PersistedSnapshot, SnapshotStore};
use crate::{Error, Result};

use rand::Rng;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{error, info, warn};

/// Where the data set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    /// Reused from a snapshot that still fits the configuration
    Snapshot,
    /// Generated during this run
    Generated,
}

impl DatasetOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetOrigin::Snapshot => "snapshot",
            DatasetOrigin::Generated => "generated",
        }
    }
}

/// The immutable catalogs served for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    metrics: MetricCatalog,
    labels: LabelCatalog,
    rotation: LabelCatalog,
}

impl Dataset {
    pub fn new(metrics: MetricCatalog, labels: LabelCatalog, rotation: LabelCatalog) -> Self {
        Self {
            metrics,
            labels,
            rotation,
        }
    }

    /// Generate all three catalogs: labels, then rotation labels disjoint
    /// from them, then metrics over the main labels. The configuration is
    /// validated first.
    pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let labels = build_label_catalog(config, &HashSet::new(), rng)?;
        let rotation = build_rotation_catalog(config, &labels, rng)?;
        let metrics = build_metric_catalog(config, &labels, rng)?;

        let dataset = Self::new(metrics, labels, rotation);
        info!(
            metrics = dataset.metrics.len(),
            series = dataset.series_count(),
            labels = dataset.labels.len(),
            rotation_labels = dataset.rotation.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generated synthetic data set"
        );
        Ok(dataset)
    }

    /// Reuse the persisted snapshot when it still fits `config`, otherwise
    /// generate and (when persistence is enabled) save the new data.
    ///
    /// Snapshot problems only cause regeneration; a failed save is logged
    /// and ignored. An invalid configuration and generation failures are
    /// returned.
    pub fn initialize<R: Rng + ?Sized>(
        config: &GeneratorConfig,
        store: &SnapshotStore,
        rng: &mut R,
    ) -> Result<(Self, DatasetOrigin)> {
        config.validate()?;
        if !config.persist_between_runs {
            return Ok((Self::generate(config, rng)?, DatasetOrigin::Generated));
        }

        match Self::load_valid(config, store) {
            Ok(Some(dataset)) => {
                info!(
                    path = %store.path().display(),
                    metrics = dataset.metrics.len(),
                    series = dataset.series_count(),
                    "Reusing existing data"
                );
                return Ok((dataset, DatasetOrigin::Snapshot));
            }
            Ok(None) => {
                info!(path = %store.path().display(), "No existing data found, generating new data");
            }
            Err(Error::SnapshotUnreadable(reason)) => {
                warn!(reason = %reason, "Unable to load existing data, generating new data");
            }
            Err(Error::SnapshotShapeMismatch(checks)) => {
                warn!(
                    failed_checks = %checks.join(","),
                    "Existing data does not match config, generating new data"
                );
            }
            Err(e) => return Err(e),
        }

        let dataset = Self::generate(config, rng)?;
        match store.save(&dataset.to_snapshot()) {
            Ok(()) => info!(path = %store.path().display(), "Persisted generated data"),
            Err(e) => error!(
                path = %store.path().display(),
                error = %e,
                "Failed to persist generated data, continuing with in-memory data"
            ),
        }
        Ok((dataset, DatasetOrigin::Generated))
    }

    fn load_valid(config: &GeneratorConfig, store: &SnapshotStore) -> Result<Option<Self>> {
        let Some(snapshot) = store.load()? else {
            return Ok(None);
        };

        let report = validate(&snapshot, config);
        if !report.is_match() {
            return Err(Error::SnapshotShapeMismatch(report.failed_names()));
        }
        Ok(Some(Self::from_snapshot(snapshot)))
    }

    pub fn from_snapshot(snapshot: PersistedSnapshot) -> Self {
        let (metrics, labels, rotation) = snapshot.into_catalogs();
        Self::new(metrics, labels, rotation)
    }

    pub fn to_snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot::from_catalogs(&self.metrics, &self.labels, &self.rotation)
    }

    pub fn metrics(&self) -> &MetricCatalog {
        &self.metrics
    }

    pub fn labels(&self) -> &LabelCatalog {
        &self.labels
    }

    pub fn rotation(&self) -> &LabelCatalog {
        &self.rotation
    }

    /// Label names every exported gauge declares: main labels followed by
    /// rotation labels.
    pub fn exported_label_names(&self) -> Vec<&str> {
        self.labels.names().chain(self.rotation.names()).collect()
    }

    pub fn series_count(&self) -> usize {
        self.metrics.iter().map(|(_, series)| series.len()).sum()
    }
}
