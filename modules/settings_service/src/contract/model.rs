//! Contract models for settings service
//!
//! These models are transport-agnostic and used for inter-module communication.

use serde_json::Value;

/// Where a resolved setting value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    /// Present in storage
    Stored,
    /// Derived from the project root
    Generated,
    /// Static default table
    Default,
}

/// A setting value together with its origin
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSetting {
    /// Setting name as requested
    pub name: String,
    /// Resolved value
    pub value: Value,
    /// Layer that produced the value
    pub source: SettingSource,
}

impl ResolvedSetting {
    pub fn new(name: impl Into<String>, value: Value, source: SettingSource) -> Self {
        Self {
            name: name.into(),
            value,
            source,
        }
    }
}
