//! Label value rotation
//!
//! A cron schedule periodically replaces the [`RotatedOverlay`] with a fresh
//! draw from the rotation catalog and tells the [`RotationTarget`] to drop
//! previously exported series. With an empty rotation catalog nothing is
//! armed and the overlay stays empty.

mod overlay;

pub use overlay::{OverlayHandle, RotatedOverlay};

use crate::dataset::Dataset;
use crate::{Error, Result};

use chrono::{DateTime, Utc};
use cron::Schedule;
use rand::rngs::StdRng;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Receives each freshly drawn overlay
pub trait RotationTarget: Send + Sync {
    /// Install `overlay` and reset previously exported series
    fn apply_rotation(&self, overlay: RotatedOverlay);
}

/// Parse a cron expression. Standard 5-field expressions get a leading
/// seconds field of `0`; 6- and 7-field expressions are used as-is.
pub fn parse_schedule(expression: &str) -> Result<Schedule> {
    let trimmed = expression.trim();
    let normalized = if trimmed.split_whitespace().count() == 5 {
        format!("0 {trimmed}")
    } else {
        trimmed.to_string()
    };
    Schedule::from_str(&normalized)
        .map_err(|e| Error::Schedule(format!("invalid cron expression '{expression}': {e}")))
}

/// Fires rotation ticks on a cron schedule
pub struct RotationScheduler {
    expression: String,
    schedule: Schedule,
    dataset: Arc<Dataset>,
    target: Arc<dyn RotationTarget>,
    rng: StdRng,
}

impl RotationScheduler {
    /// Arm the scheduler. Returns `Ok(None)` when the data set has no
    /// rotation labels.
    pub fn arm(
        expression: &str,
        dataset: Arc<Dataset>,
        target: Arc<dyn RotationTarget>,
        rng: StdRng,
    ) -> Result<Option<Self>> {
        if dataset.rotation().is_empty() {
            info!("No rotation labels, label value rotation disabled");
            return Ok(None);
        }

        let schedule = parse_schedule(expression)?;
        info!(
            schedule = %expression,
            rotation_labels = dataset.rotation().len(),
            "Label value rotation armed"
        );
        Ok(Some(Self {
            expression: expression.to_string(),
            schedule,
            dataset,
            target,
            rng,
        }))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn next_fire_after(&self, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(after).next()
    }

    /// Draw a new overlay and hand it to the target
    pub fn tick(&mut self) {
        let overlay = RotatedOverlay::draw(self.dataset.rotation(), &mut self.rng);
        debug!(labels = overlay.len(), "Rotating label values");
        self.target.apply_rotation(overlay);
    }

    /// Run until `shutdown` is cancelled
    pub async fn run(mut self, shutdown: CancellationToken) {
        loop {
            let now = Utc::now();
            let Some(next) = self.next_fire_after(&now) else {
                warn!(schedule = %self.expression, "Rotation schedule has no upcoming fire time");
                return;
            };
            let delay = (next - now).to_std().unwrap_or_default();
            debug!(next = %next, "Next label rotation scheduled");

            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    self.tick();
                    info!(schedule = %self.expression, "Rotated label values");
                }
                _ = shutdown.cancelled() => {
                    info!("Rotation scheduler shutting down");
                    break;
                }
            }
        }
    }
}
