//! File-backed snapshot storage

use super::PersistedSnapshot;
use crate::{Error, Result};

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and writes the snapshot JSON file
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot. Returns `Ok(None)` when no file exists and
    /// [`Error::SnapshotUnreadable`] when it cannot be read or parsed.
    pub fn load(&self) -> Result<Option<PersistedSnapshot>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::SnapshotUnreadable(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let snapshot = serde_json::from_slice(&bytes).map_err(|e| {
            Error::SnapshotUnreadable(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Loaded snapshot");
        Ok(Some(snapshot))
    }

    /// Write the snapshot through a temporary sibling file and rename it
    /// into place, so a crash mid-write never leaves a truncated snapshot.
    pub fn save(&self, snapshot: &PersistedSnapshot) -> Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(Error::PersistenceWrite)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(Error::PersistenceWrite)?;
        std::fs::rename(&tmp, &self.path).map_err(Error::PersistenceWrite)?;

        debug!(path = %self.path.display(), bytes = json.len(), "Saved snapshot");
        Ok(())
    }
}
