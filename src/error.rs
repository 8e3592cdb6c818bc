//! Error types for synthmetrics

use std::fmt;

/// Result type alias for synthmetrics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for synthmetrics
#[derive(Debug)]
pub enum Error {
    /// A uniqueness or distinctness retry loop ran out of attempts
    GenerationExhausted {
        /// What was being generated (e.g. "label names")
        target: String,
        /// Consecutive rejected draws before giving up
        attempts: u32,
    },
    /// Persisted snapshot is missing, malformed or unparsable
    SnapshotUnreadable(String),
    /// Persisted snapshot parsed but no longer fits the configuration
    SnapshotShapeMismatch(Vec<String>),
    /// Writing the snapshot after generation failed
    PersistenceWrite(std::io::Error),
    /// Configuration errors
    Config(String),
    /// Invalid rotation schedule
    Schedule(String),
    /// Exposition registry errors
    Registry(String),
    /// IO errors
    Io(std::io::Error),
    /// Serialization errors
    Serialization(String),
    /// Internal error
    Internal(String),
}

impl Error {
    /// Snapshot problems are recovered locally by regenerating; everything else is fatal
    /// during startup.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::SnapshotUnreadable(_)
                | Error::SnapshotShapeMismatch(_)
                | Error::PersistenceWrite(_)
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PersistenceWrite(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::GenerationExhausted { target, attempts } => write!(
                f,
                "Generation exhausted: no new distinct {} after {} attempts",
                target, attempts
            ),
            Error::SnapshotUnreadable(msg) => write!(f, "Snapshot unreadable: {}", msg),
            Error::SnapshotShapeMismatch(checks) => {
                write!(f, "Snapshot does not match config: {}", checks.join(", "))
            }
            Error::PersistenceWrite(e) => write!(f, "Failed to persist snapshot: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Schedule(msg) => write!(f, "Schedule error: {}", msg),
            Error::Registry(msg) => write!(f, "Registry error: {}", msg),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<prometheus::Error> for Error {
    fn from(e: prometheus::Error) -> Self {
        Error::Registry(e.to_string())
    }
}

impl From<cron::error::Error> for Error {
    fn from(e: cron::error::Error) -> Self {
        Error::Schedule(e.to_string())
    }
}
