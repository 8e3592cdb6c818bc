//! Label and rotation catalog builders

use super::vocabulary::{next_token, PhraseKind};
use super::RetryBudget;
use crate::catalog::{LabelCatalog, NamePrefix};
use crate::config::GeneratorConfig;
use crate::Result;

use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Build the main label catalog.
///
/// Always targets the per-metric maximum so series assembly can subsample
/// down to the per-series minimum. Names in `exclude` are never used.
///
/// `config` must already have passed [`GeneratorConfig::validate`];
/// [`Dataset::generate`](crate::dataset::Dataset::generate) does that.
pub fn build_label_catalog<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    exclude: &HashSet<String>,
    rng: &mut R,
) -> Result<LabelCatalog> {
    let target = config.labels.per_metric.max() as usize;
    let catalog = build_catalog(
        target,
        config.labels.value_variations as usize,
        &config.labels.name_prefix(),
        exclude,
        RetryBudget::new(config.max_attempts()),
        rng,
    )?;
    debug!(labels = catalog.len(), "Built label catalog");
    Ok(catalog)
}

/// Build the rotation catalog, disjoint from `main`.
///
/// Empty when rotation is disabled.
pub fn build_rotation_catalog<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    main: &LabelCatalog,
    rng: &mut R,
) -> Result<LabelCatalog> {
    if !config.rotation_enabled() {
        return Ok(LabelCatalog::new());
    }

    let exclude: HashSet<String> = main.names().map(str::to_string).collect();
    let catalog = build_catalog(
        config.labels.qty_for_value_rotation as usize,
        config.labels.value_variations as usize,
        &config.labels.name_prefix(),
        &exclude,
        RetryBudget::new(config.max_attempts()),
        rng,
    )?;
    debug!(labels = catalog.len(), "Built rotation catalog");
    Ok(catalog)
}

fn build_catalog<R: Rng + ?Sized>(
    target: usize,
    value_variations: usize,
    prefix: &NamePrefix,
    exclude: &HashSet<String>,
    budget: RetryBudget,
    rng: &mut R,
) -> Result<LabelCatalog> {
    let mut catalog = LabelCatalog::new();
    let mut names = budget.tracker("label names");

    while catalog.len() < target {
        let name = prefix.apply(&next_token(PhraseKind::BuzzPhrase, rng));
        if catalog.contains(&name) || exclude.contains(&name) {
            names.miss()?;
            continue;
        }
        names.hit();

        let values = draw_values(value_variations, budget, rng)?;
        catalog.insert(name, values);
    }

    Ok(catalog)
}

fn draw_values<R: Rng + ?Sized>(
    count: usize,
    budget: RetryBudget,
    rng: &mut R,
) -> Result<Vec<String>> {
    let mut seen = HashSet::with_capacity(count);
    let mut values = Vec::with_capacity(count);
    let mut tracker = budget.tracker("label values");

    while values.len() < count {
        let value = next_token(PhraseKind::CatchPhraseNoun, rng);
        if !seen.insert(value.clone()) {
            tracker.miss()?;
            continue;
        }
        tracker.hit();
        values.push(value);
    }

    Ok(values)
}
