//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{SettingsApi, SettingsError};
use crate::domain::Settings;
use serde_json::Value;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Cloning the client shares the same underlying [`Settings`] instance.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Settings>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Settings>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<Settings> {
        &self.service
    }
}

impl SettingsApi for NativeClient {
    fn get_setting(&self, setting: &str) -> Result<Option<Value>, SettingsError> {
        self.service.get(setting)
    }

    fn set_setting(&self, setting: &str, value: Value) -> Result<bool, SettingsError> {
        self.service.set(setting, value)
    }

    fn add_setting(&self, setting: &str, value: Value) -> Result<bool, SettingsError> {
        self.service.add(setting, value)
    }

    fn inject_settings(&self, settings: Value, lock: bool) -> Result<(), SettingsError> {
        self.service.inject_settings(settings, lock)
    }
}
