//! Catalog types
//!
//! A catalog is an insertion-ordered, name-keyed collection built once at
//! startup and read-only afterwards:
//!
//! - [`LabelCatalog`]: label name → distinct values (also used for the
//!   rotation catalog)
//! - [`MetricCatalog`]: metric name → distinct [`TimeSeries`]

mod prefix;

pub use prefix::{NamePrefix, DEFAULT_PREFIX, PREFIX_SEPARATOR};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

/// Label name → ordered distinct values
pub type LabelCatalog = Catalog<Vec<String>>;

/// Metric name → ordered distinct time series
pub type MetricCatalog = Catalog<Vec<TimeSeries>>;

/// Insertion-ordered map with unique string keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Catalog<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build from ordered entries; a repeated name keeps its first entry
    pub fn from_entries(entries: impl IntoIterator<Item = (String, V)>) -> Self {
        let mut catalog = Self::new();
        for (name, value) in entries {
            catalog.insert(name, value);
        }
        catalog
    }

    /// Insert a new entry. Returns false (and leaves the catalog untouched)
    /// when the name is already present.
    pub fn insert(&mut self, name: String, value: V) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, value));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn first(&self) -> Option<(&str, &V)> {
        self.entries.first().map(|(name, value)| (name.as_str(), value))
    }

    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V> Default for Catalog<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// One label-name → value assignment under a metric.
///
/// Keys are kept sorted, so two series with the same content compare equal
/// and share one canonical key regardless of how they were assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(BTreeMap<String, String>);

impl TimeSeries {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label pairs in sorted name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Deterministic serialization used for content deduplication,
    /// e.g. `{a="x",b="y"}`
    pub fn canonical_key(&self) -> String {
        let mut key = String::from("{");
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                key.push(',');
            }
            let _ = write!(key, "{name}={value:?}");
        }
        key.push('}');
        key
    }
}

impl FromIterator<(String, String)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
