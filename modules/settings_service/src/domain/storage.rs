//! Settings storage

use pathmap::{PathMap, PathMapError};
use serde_json::Value;
use std::ops::{Deref, DerefMut};

/// Path-addressed storage for settings.
///
/// Initial entries are always parsed, so `dir.cache` given at construction
/// lands at `dir -> cache`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsMap(PathMap);

impl SettingsMap {
    pub fn new(initial: impl Into<Value>, delimiter: &str) -> Result<Self, PathMapError> {
        PathMap::from_value(initial, true, delimiter).map(Self)
    }
}

impl Deref for SettingsMap {
    type Target = PathMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SettingsMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
