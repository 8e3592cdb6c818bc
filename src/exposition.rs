//! Prometheus exposition of the generated data set
//!
//! [`Exposition`] is the explicit context object that owns the registry and
//! one gauge per generated metric. Scrapes call [`Exposition::scrape`];
//! rotation ticks call [`RotationTarget::apply_rotation`]. Both paths take
//! the same update lock, so a scrape never observes gauges a rotation has
//! just reset.

use crate::catalog::Catalog;
use crate::dataset::Dataset;
use crate::rotation::{OverlayHandle, RotatedOverlay, RotationTarget};
use crate::{Error, Result};

use parking_lot::Mutex;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

pub const GAUGE_HELP: &str = "a generated gauge metric";

/// Upper bound (exclusive) of generated gauge values
pub const MAX_VALUE: f64 = 100.0;

pub struct Exposition {
    registry: Registry,
    gauges: Catalog<GaugeVec>,
    label_names: Vec<String>,
    dataset: Arc<Dataset>,
    overlay: OverlayHandle,
    /// Value RNG; holding it also serializes refresh against rotation
    update: Mutex<StdRng>,
}

impl Exposition {
    /// Register one gauge per metric in a fresh registry
    pub fn new(
        dataset: Arc<Dataset>,
        overlay: RotatedOverlay,
        collect_default_metrics: bool,
        rng: StdRng,
    ) -> Result<Self> {
        let registry = Registry::new();
        let label_names: Vec<String> = dataset
            .exported_label_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let label_refs: Vec<&str> = label_names.iter().map(String::as_str).collect();

        let mut gauges = Catalog::new();
        for name in dataset.metrics().names() {
            let gauge = GaugeVec::new(Opts::new(name, GAUGE_HELP), &label_refs)?;
            registry.register(Box::new(gauge.clone()))?;
            gauges.insert(name.to_string(), gauge);
        }

        if collect_default_metrics {
            register_process_collector(&registry)?;
        }

        info!(
            gauges = gauges.len(),
            label_names = label_names.len(),
            default_metrics = collect_default_metrics,
            "Registered generated gauges"
        );

        Ok(Self {
            registry,
            gauges,
            label_names,
            dataset,
            overlay: OverlayHandle::new(overlay),
            update: Mutex::new(rng),
        })
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn overlay(&self) -> Arc<RotatedOverlay> {
        self.overlay.load()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Assign fresh values using the exposition's own RNG
    pub fn refresh(&self) {
        let mut rng = self.update.lock();
        self.set_values(&mut *rng);
    }

    /// Assign fresh values drawn from `rng`
    pub fn refresh_values<R: Rng + ?Sized>(&self, rng: &mut R) {
        let _guard = self.update.lock();
        self.set_values(rng);
    }

    /// Drop every exported series
    pub fn reset(&self) {
        let _guard = self.update.lock();
        self.reset_gauges();
    }

    /// Refresh every series and encode the result in one critical section,
    /// so a concurrent rotation cannot reset the gauges in between.
    pub fn scrape(&self) -> Result<String> {
        let mut rng = self.update.lock();
        self.set_values(&mut *rng);
        self.render()
    }

    /// Encode the registry in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    fn set_values<R: Rng + ?Sized>(&self, rng: &mut R) {
        let overlay = self.overlay.load();
        let mut written = 0usize;

        for (metric, series_list) in self.dataset.metrics().iter() {
            let Some(gauge) = self.gauges.get(metric) else {
                continue;
            };
            for series in series_list {
                let values: Vec<&str> = self
                    .label_names
                    .iter()
                    .map(|name| {
                        overlay
                            .get(name)
                            .or_else(|| series.get(name))
                            .unwrap_or("")
                    })
                    .collect();
                gauge.with_label_values(&values).set(sample_value(rng));
                written += 1;
            }
        }
        debug!(series = written, "Refreshed gauge values");
    }

    fn reset_gauges(&self) {
        for (_, gauge) in self.gauges.iter() {
            gauge.reset();
        }
    }
}

impl RotationTarget for Exposition {
    fn apply_rotation(&self, overlay: RotatedOverlay) {
        let _guard = self.update.lock();
        self.overlay.swap(overlay);
        self.reset_gauges();
    }
}

/// Uniform value in `[0, MAX_VALUE)` with two decimals
pub fn sample_value<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let cents = (MAX_VALUE * 100.0) as u32;
    f64::from(rng.gen_range(0..cents)) / 100.0
}

#[cfg(target_os = "linux")]
fn register_process_collector(registry: &Registry) -> Result<()> {
    registry.register(Box::new(
        prometheus::process_collector::ProcessCollector::for_self(),
    ))?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn register_process_collector(_registry: &Registry) -> Result<()> {
    tracing::warn!("Process metrics are only collected on Linux");
    Ok(())
}
