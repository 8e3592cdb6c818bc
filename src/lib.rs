//! # synthmetrics
//!
//! A synthetic metrics generator: builds a configuration-constrained corpus of
//! fake metric names, label names and label values, and serves it as a
//! continuously refreshed Prometheus feed.
//!
//! ## Key Features
//!
//! - **Bounded generation**: unique names and value vocabularies are drawn
//!   with an explicit retry budget instead of open-ended loops
//! - **Persistence between runs**: generated catalogs are saved and reused
//!   as long as they still fit the configuration
//! - **Label value rotation**: a cron schedule swaps in fresh values for a
//!   dedicated set of rotation labels
//!
//! ## Architecture
//!
//! - [`generator`]: vocabulary, label catalogs and time series assembly
//! - [`persistence`]: snapshot storage and shape validation
//! - [`dataset`]: startup orchestration (reuse or regenerate)
//! - [`exposition`]: Prometheus registry and gauges
//! - [`rotation`]: rotated label overlay and its scheduler
//! - [`api`]: HTTP routes

pub mod api;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod exposition;
pub mod generator;
pub mod persistence;
pub mod rotation;
pub mod telemetry;

mod error;

pub use error::{Error, Result};

pub use catalog::{LabelCatalog, MetricCatalog, NamePrefix, TimeSeries};
pub use config::{CountSpec, GeneratorConfig};
pub use dataset::{Dataset, DatasetOrigin};
pub use exposition::Exposition;
pub use persistence::SnapshotStore;
pub use rotation::{RotatedOverlay, RotationScheduler};
