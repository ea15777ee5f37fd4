//! Contract error types for settings service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use pathmap::PathMapError;

/// Settings service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Setting is locked against runtime changes
    #[error("Setting is locked: {setting}")]
    Locked {
        /// Setting name
        setting: String,
    },

    /// The whole store is frozen
    #[error("Settings are frozen, cannot change: {setting}")]
    Frozen {
        /// Setting name
        setting: String,
    },

    /// Validation error
    #[error("Validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Storage rejected the operation
    #[error(transparent)]
    Storage(#[from] PathMapError),
}
