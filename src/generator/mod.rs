//! Synthetic catalog generation
//!
//! Builds the label, rotation and metric catalogs from configuration:
//! - [`vocabulary`]: phrase source and token sanitization
//! - [`build_label_catalog`] / [`build_rotation_catalog`]: label universes
//! - [`build_metric_catalog`]: per-metric time series assembly
//!
//! Every reject-and-retry loop runs against a [`RetryBudget`] so a
//! configuration asking for more distinct values than the vocabulary can
//! produce fails with [`crate::Error::GenerationExhausted`] instead of
//! spinning forever.

mod labels;
mod series;
pub mod vocabulary;

pub use labels::{build_label_catalog, build_rotation_catalog};
pub use series::{build_metric_catalog, pick_label_values};
pub use vocabulary::PhraseKind;

use crate::{Error, Result};

/// Cap on consecutive rejected draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    max_attempts: u32,
}

impl RetryBudget {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Start tracking misses for one accumulation loop
    pub(crate) fn tracker(&self, target: &'static str) -> RetryTracker {
        RetryTracker {
            budget: *self,
            target,
            misses: 0,
        }
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_ATTEMPTS)
    }
}

/// Counts consecutive misses of one loop; any accepted draw resets it.
#[derive(Debug)]
pub(crate) struct RetryTracker {
    budget: RetryBudget,
    target: &'static str,
    misses: u32,
}

impl RetryTracker {
    pub(crate) fn hit(&mut self) {
        self.misses = 0;
    }

    pub(crate) fn miss(&mut self) -> Result<()> {
        self.misses += 1;
        if self.misses >= self.budget.max_attempts {
            return Err(Error::GenerationExhausted {
                target: self.target.to_string(),
                attempts: self.misses,
            });
        }
        Ok(())
    }
}
