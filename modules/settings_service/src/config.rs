//! Configuration for settings service module

use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

/// Settings service configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path delimiter for setting names
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Lock every key passed in at construction
    #[serde(default)]
    pub lock_injected: bool,

    /// Freeze the store at construction. Unset leaves it unfrozen.
    #[serde(default)]
    pub freeze: Option<bool>,

    /// Return refused writes as errors instead of `false`
    #[serde(default)]
    pub throw_on_error: bool,

    /// Project root for generated directory settings.
    /// Falls back to the current working directory.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            lock_injected: false,
            freeze: None,
            throw_on_error: false,
            root_dir: None,
        }
    }
}

impl Config {
    /// Parse a YAML document
    pub fn from_yaml_str(input: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(input).context("failed to parse settings service config")
    }
}

fn default_delimiter() -> String {
    pathmap::DEFAULT_DELIMITER.to_string()
}
