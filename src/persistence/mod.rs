//! Snapshot persistence between runs
//!
//! - [`PersistedSnapshot`]: serialized catalogs
//! - [`SnapshotStore`]: JSON file storage
//! - [`validate`] / [`matches`]: decide whether a snapshot still fits the
//!   current configuration

mod snapshot;
mod store;
mod validator;

pub use snapshot::PersistedSnapshot;
pub use store::SnapshotStore;
pub use validator::{matches, validate, ShapeCheck, ShapeReport};
