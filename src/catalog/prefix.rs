//! Name prefixes
//!
//! Generated names carry an optional prefix joined by [`PREFIX_SEPARATOR`],
//! e.g. `myapp__synergize_viral_paradigms`.

use std::fmt;

/// Separator between a prefix and the generated token
pub const PREFIX_SEPARATOR: &str = "__";

/// Prefix used when the configuration does not set one
pub const DEFAULT_PREFIX: &str = "fake";

/// The prefix segment of a generated name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamePrefix {
    /// No prefix segment
    None,
    /// `<prefix>__` segment
    Named(String),
}

impl NamePrefix {
    /// Resolve the configured prefix option: absent means [`DEFAULT_PREFIX`],
    /// empty disables prefixing.
    pub fn resolve(configured: Option<&str>) -> Self {
        match configured {
            None => NamePrefix::Named(DEFAULT_PREFIX.to_string()),
            Some("") => NamePrefix::None,
            Some(prefix) => NamePrefix::Named(prefix.to_string()),
        }
    }

    /// Recover the prefix of an existing name from the text before the first
    /// separator. Names without a separator (or with nothing before it) have
    /// no prefix.
    pub fn parse(name: &str) -> Self {
        match name.split_once(PREFIX_SEPARATOR) {
            Some((prefix, _)) if !prefix.is_empty() => NamePrefix::Named(prefix.to_string()),
            _ => NamePrefix::None,
        }
    }

    /// Prepend this prefix to `token`
    pub fn apply(&self, token: &str) -> String {
        match self {
            NamePrefix::None => token.to_string(),
            NamePrefix::Named(prefix) => format!("{prefix}{PREFIX_SEPARATOR}{token}"),
        }
    }
}

impl fmt::Display for NamePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePrefix::None => write!(f, "<none>"),
            NamePrefix::Named(prefix) => write!(f, "{prefix}"),
        }
    }
}
