//! Generator configuration
//!
//! The configuration is a JSON document with camelCase keys:
//!
//! ```json
//! {
//!   "labels": { "prefix": "myapp", "perMetric": [1, 4], "valueVariations": 5,
//!               "qtyForValueRotation": 2, "rotationCronSchedule": "0 */6 * * *" },
//!   "metrics": { "quantity": 20, "timeSeries": [1, 10] },
//!   "persistBetweenRuns": true,
//!   "collectDefaultMetrics": false
//! }
//! ```
//!
//! Counts accept either a single number or a `[min, max]` pair. The older
//! `minPerMetric`/`maxPerMetric` and `minTimeSeries`/`maxTimeSeries` keys are
//! still accepted and folded into ranges.

use crate::catalog::{NamePrefix, PREFIX_SEPARATOR};
use crate::{Error, Result};

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Default cron expression for label value rotation (every 6 hours)
pub const DEFAULT_ROTATION_SCHEDULE: &str = "0 */6 * * *";

/// Default number of consecutive rejected draws before generation gives up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// A fixed count or an inclusive `[min, max]` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountSpec {
    Fixed(u32),
    Range([u32; 2]),
}

impl CountSpec {
    pub fn min(&self) -> u32 {
        match self {
            CountSpec::Fixed(n) => *n,
            CountSpec::Range([min, _]) => *min,
        }
    }

    pub fn max(&self) -> u32 {
        match self {
            CountSpec::Fixed(n) => *n,
            CountSpec::Range([_, max]) => *max,
        }
    }

    /// Whether `count` fits (exact for fixed, inclusive for ranges)
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min() as usize && count <= self.max() as usize
    }

    /// Draw a count uniformly from the allowed values. Panics on an inverted
    /// range, which [`GeneratorConfig::validate`] rejects.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self {
            CountSpec::Fixed(n) => *n as usize,
            CountSpec::Range([min, max]) => rng.gen_range(*min..=*max) as usize,
        }
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.min() > self.max() {
            return Err(Error::Config(format!(
                "{field}: min ({}) must not exceed max ({})",
                self.min(),
                self.max()
            )));
        }
        Ok(())
    }
}

/// Label generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLabelsConfig")]
pub struct LabelsConfig {
    /// Prefix for label names; absent means `fake`, empty disables prefixing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Labels per time series
    pub per_metric: CountSpec,
    /// Distinct values per label
    pub value_variations: u32,
    /// Number of rotating labels (0 disables rotation)
    pub qty_for_value_rotation: u32,
    /// Cron expression driving rotation
    pub rotation_cron_schedule: String,
}

impl LabelsConfig {
    pub fn name_prefix(&self) -> NamePrefix {
        NamePrefix::resolve(self.prefix.as_deref())
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            per_metric: CountSpec::Range([1, 5]),
            value_variations: 5,
            qty_for_value_rotation: 0,
            rotation_cron_schedule: DEFAULT_ROTATION_SCHEDULE.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLabelsConfig {
    prefix: Option<String>,
    per_metric: Option<CountSpec>,
    min_per_metric: Option<u32>,
    max_per_metric: Option<u32>,
    value_variations: u32,
    qty_for_value_rotation: Option<u32>,
    rotation_cron_schedule: Option<String>,
}

impl TryFrom<RawLabelsConfig> for LabelsConfig {
    type Error = String;

    fn try_from(raw: RawLabelsConfig) -> std::result::Result<Self, Self::Error> {
        let per_metric = legacy_count(
            raw.per_metric,
            raw.min_per_metric,
            raw.max_per_metric,
            "labels.perMetric",
        )?;
        Ok(Self {
            prefix: raw.prefix,
            per_metric,
            value_variations: raw.value_variations,
            qty_for_value_rotation: raw.qty_for_value_rotation.unwrap_or(0),
            rotation_cron_schedule: raw
                .rotation_cron_schedule
                .unwrap_or_else(|| DEFAULT_ROTATION_SCHEDULE.to_string()),
        })
    }
}

/// Metric generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMetricsConfig")]
pub struct MetricsConfig {
    /// Prefix for metric names; absent means `fake`, empty disables prefixing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Number of metric names
    pub quantity: u32,
    /// Time series per metric name
    pub time_series: CountSpec,
}

impl MetricsConfig {
    pub fn name_prefix(&self) -> NamePrefix {
        NamePrefix::resolve(self.prefix.as_deref())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            quantity: 20,
            time_series: CountSpec::Range([1, 10]),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetricsConfig {
    prefix: Option<String>,
    quantity: u32,
    time_series: Option<CountSpec>,
    min_time_series: Option<u32>,
    max_time_series: Option<u32>,
}

impl TryFrom<RawMetricsConfig> for MetricsConfig {
    type Error = String;

    fn try_from(raw: RawMetricsConfig) -> std::result::Result<Self, Self::Error> {
        let time_series = legacy_count(
            raw.time_series,
            raw.min_time_series,
            raw.max_time_series,
            "metrics.timeSeries",
        )?;
        Ok(Self {
            prefix: raw.prefix,
            quantity: raw.quantity,
            time_series,
        })
    }
}

/// A non-empty prefix must be a valid Prometheus name start
/// (`[a-zA-Z_][a-zA-Z0-9_]*`) without the `__` separator inside it.
fn validate_prefix(field: &str, prefix: Option<&str>) -> Result<()> {
    let Some(prefix) = prefix.filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let mut chars = prefix.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_start || !valid_rest {
        return Err(Error::Config(format!(
            "{field} '{prefix}' must match [a-zA-Z_][a-zA-Z0-9_]*"
        )));
    }
    if prefix.contains(PREFIX_SEPARATOR) {
        return Err(Error::Config(format!(
            "{field} '{prefix}' must not contain '{PREFIX_SEPARATOR}'"
        )));
    }
    Ok(())
}

fn legacy_count(
    spec: Option<CountSpec>,
    min: Option<u32>,
    max: Option<u32>,
    field: &str,
) -> std::result::Result<CountSpec, String> {
    match (spec, min, max) {
        (Some(spec), _, _) => Ok(spec),
        (None, Some(min), Some(max)) => Ok(CountSpec::Range([min, max])),
        (None, None, Some(max)) => Ok(CountSpec::Range([max, max])),
        _ => Err(format!("missing field `{field}`")),
    }
}

/// Top-level generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub labels: LabelsConfig,
    pub metrics: MetricsConfig,
    /// Save generated data and reuse it on the next run when still valid
    #[serde(default)]
    pub persist_between_runs: bool,
    /// Also expose process metrics from the exposition registry
    #[serde(default)]
    pub collect_default_metrics: bool,
    /// Seed for reproducible generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Consecutive rejected draws tolerated before generation fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            labels: LabelsConfig::default(),
            metrics: MetricsConfig::default(),
            persist_between_runs: false,
            collect_default_metrics: false,
            seed: None,
            max_attempts: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file falls back to [`GeneratorConfig::default`]; a file that
    /// exists but cannot be parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Config file not found, using default config");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let config = Self::from_json(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Loaded generator config");
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.labels.per_metric.validate("labels.perMetric")?;
        self.metrics.time_series.validate("metrics.timeSeries")?;

        if self.labels.per_metric.max() == 0 {
            return Err(Error::Config(
                "labels.perMetric maximum must be at least 1".to_string(),
            ));
        }
        if self.labels.value_variations == 0 {
            return Err(Error::Config(
                "labels.valueVariations must be at least 1".to_string(),
            ));
        }
        if self.metrics.quantity == 0 {
            return Err(Error::Config(
                "metrics.quantity must be at least 1".to_string(),
            ));
        }
        if self.metrics.time_series.max() == 0 {
            return Err(Error::Config(
                "metrics.timeSeries maximum must be at least 1".to_string(),
            ));
        }
        validate_prefix("labels.prefix", self.labels.prefix.as_deref())?;
        validate_prefix("metrics.prefix", self.metrics.prefix.as_deref())?;
        if self.max_attempts == Some(0) {
            return Err(Error::Config("maxAttempts must be at least 1".to_string()));
        }
        if self.rotation_enabled() {
            crate::rotation::parse_schedule(&self.labels.rotation_cron_schedule)?;
        }
        Ok(())
    }

    pub fn rotation_enabled(&self) -> bool {
        self.labels.qty_for_value_rotation > 0
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }
}
