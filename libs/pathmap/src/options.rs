//! Construction options for path maps

use serde::Deserialize;

/// Options for building a [`crate::PathMap`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathMapOptions {
    /// Segment delimiter, must not be empty
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Insert initial entries through path-aware `set` instead of storing
    /// their keys literally
    #[serde(default)]
    pub parse: bool,
}

impl Default for PathMapOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            parse: false,
        }
    }
}

fn default_delimiter() -> String {
    crate::DEFAULT_DELIMITER.to_string()
}
