//! Time series assembly

use super::vocabulary::{next_token, PhraseKind};
use super::RetryBudget;
use crate::catalog::{LabelCatalog, MetricCatalog, TimeSeries};
use crate::config::{CountSpec, GeneratorConfig};
use crate::{Error, Result};

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Build the metric catalog from an already-built label catalog.
///
/// Each metric gets a series count drawn from `metrics.timeSeries`; each
/// series draws a label count from `labels.perMetric`, picks that many
/// distinct labels and one value per label. Series with identical content
/// under the same metric are rejected.
///
/// `config` must already have passed [`GeneratorConfig::validate`].
pub fn build_metric_catalog<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    labels: &LabelCatalog,
    rng: &mut R,
) -> Result<MetricCatalog> {
    let per_metric = config.labels.per_metric;
    let label_names: Vec<&str> = labels.names().collect();
    if per_metric.min() as usize > label_names.len() {
        return Err(Error::Config(format!(
            "labels.perMetric minimum ({}) exceeds the {} labels available",
            per_metric.min(),
            label_names.len()
        )));
    }

    let prefix = config.metrics.name_prefix();
    let budget = RetryBudget::new(config.max_attempts());
    let mut catalog = MetricCatalog::new();
    let mut names = budget.tracker("metric names");

    while catalog.len() < config.metrics.quantity as usize {
        let name = prefix.apply(&next_token(PhraseKind::CatchPhrase, rng));
        if catalog.contains(&name) {
            names.miss()?;
            continue;
        }
        names.hit();

        let target = config.metrics.time_series.sample(rng);
        let series = assemble_series(target, &label_names, labels, per_metric, budget, rng)?;
        catalog.insert(name, series);
    }

    debug!(
        metrics = catalog.len(),
        series = catalog.iter().map(|(_, s)| s.len()).sum::<usize>(),
        "Built metric catalog"
    );
    Ok(catalog)
}

fn assemble_series<R: Rng + ?Sized>(
    target: usize,
    label_names: &[&str],
    labels: &LabelCatalog,
    per_metric: CountSpec,
    budget: RetryBudget,
    rng: &mut R,
) -> Result<Vec<TimeSeries>> {
    let mut seen = HashSet::with_capacity(target);
    let mut series = Vec::with_capacity(target);
    let mut tracker = budget.tracker("time series");

    while series.len() < target {
        let count = per_metric.sample(rng).min(label_names.len());
        let chosen: Vec<&str> = label_names.choose_multiple(rng, count).copied().collect();
        let candidate = pick_label_values(&chosen, labels, rng);

        if !seen.insert(candidate.canonical_key()) {
            tracker.miss()?;
            continue;
        }
        tracker.hit();
        series.push(candidate);
    }

    Ok(series)
}

/// Choose one value uniformly for each of `names` from `catalog`.
///
/// Asking for labels the catalog does not know yields an empty assignment.
pub fn pick_label_values<R: Rng + ?Sized>(
    names: &[&str],
    catalog: &LabelCatalog,
    rng: &mut R,
) -> TimeSeries {
    if names.is_empty() {
        return TimeSeries::new();
    }
    if catalog.is_empty() {
        warn!("Tried picking label values but the label catalog is empty");
        return TimeSeries::new();
    }

    let mut series = TimeSeries::new();
    for name in names {
        let Some(value) = catalog.get(name).and_then(|values| values.choose(rng)) else {
            warn!(label = %name, "Tried picking a value for a label missing from the catalog");
            return TimeSeries::new();
        };
        series.insert(*name, value.clone());
    }
    series
}
