//! Logging bootstrap for synthmetrics binaries.

use crate::{Error, Result};

use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::Config(format!(
                "invalid log format '{other}', expected one of [text, json]"
            ))),
        }
    }
}

/// Install the global `tracing` subscriber.
pub fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let level = parse_log_level(log_level)?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.with_thread_ids(true).json().try_init(),
    };
    installed.map_err(|e| Error::Config(format!("failed to initialize log subscriber: {e}")))?;

    info!(level = %level, format = format.as_str(), "Logging initialized");
    Ok(())
}

pub fn parse_log_level(raw: &str) -> Result<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(Error::Config(format!(
            "invalid log level '{other}', expected one of [trace, debug, info, warn, error]"
        ))),
    }
}
