//! Rotated label overlay

use crate::catalog::{LabelCatalog, TimeSeries};
use crate::generator::pick_label_values;

use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;

/// Rotation label → currently active value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotatedOverlay {
    values: TimeSeries,
}

impl RotatedOverlay {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draw one value per rotation label
    pub fn draw<R: Rng + ?Sized>(rotation: &LabelCatalog, rng: &mut R) -> Self {
        if rotation.is_empty() {
            return Self::empty();
        }
        let names: Vec<&str> = rotation.names().collect();
        Self {
            values: pick_label_values(&names, rotation, rng),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter()
    }
}

/// Shared handle to the active overlay.
///
/// The overlay is swapped as a whole; readers hold an `Arc` to the version
/// they loaded and never see a partially updated one.
#[derive(Debug, Default)]
pub struct OverlayHandle {
    current: RwLock<Arc<RotatedOverlay>>,
}

impl OverlayHandle {
    pub fn new(initial: RotatedOverlay) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    pub fn load(&self) -> Arc<RotatedOverlay> {
        Arc::clone(&self.current.read())
    }

    /// Replace the overlay, returning the previous one
    pub fn swap(&self, next: RotatedOverlay) -> Arc<RotatedOverlay> {
        std::mem::replace(&mut *self.current.write(), Arc::new(next))
    }
}
