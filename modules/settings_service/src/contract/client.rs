//! Native client trait for inter-module communication
//!
//! Application code depends on this trait and receives an explicitly
//! constructed instance rather than reaching for a global.

use super::error::SettingsError;
use serde_json::Value;

/// Settings service API for inter-module communication
pub trait SettingsApi: Send + Sync {
    /// Resolve a setting: stored, then generated, then default
    fn get_setting(&self, setting: &str) -> Result<Option<Value>, SettingsError>;

    /// Store a setting. `Ok(false)` when the setting is locked or frozen.
    fn set_setting(&self, setting: &str, value: Value) -> Result<bool, SettingsError>;

    /// Store a setting unless it already has a value
    fn add_setting(&self, setting: &str, value: Value) -> Result<bool, SettingsError>;

    /// Fill in missing settings, optionally locking them
    fn inject_settings(&self, settings: Value, lock: bool) -> Result<(), SettingsError>;
}
