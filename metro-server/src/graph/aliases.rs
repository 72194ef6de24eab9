//! Station name alias index.

use std::collections::HashMap;

use crate::domain::StationGroup;

/// Normalize a free-text station name for lookup.
///
/// Matching ignores case and surrounding whitespace. Returns `None` when
/// nothing is left after trimming.
pub fn normalize(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Name → station group lookup.
///
/// Names in either language map to a group. A name maps to at most one
/// group; on collision the last insertion wins.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    names: HashMap<String, StationGroup>,
}

impl AliasIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name for a group. Blank names are ignored.
    pub fn insert(&mut self, name: &str, group: StationGroup) {
        if let Some(key) = normalize(name) {
            self.names.insert(key, group);
        }
    }

    /// Resolve a free-text name to its group.
    pub fn resolve(&self, name: &str) -> Option<StationGroup> {
        let key = normalize(name)?;
        self.names.get(&key).copied()
    }

    /// Number of distinct names registered.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
