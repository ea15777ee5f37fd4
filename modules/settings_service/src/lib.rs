//! Settings Service Module
//!
//! Layered settings on top of dot-path addressed storage. A setting resolves
//! to its stored value, then to a directory generated from the project root,
//! then to a static default. Individual settings can be locked and the whole
//! store can be frozen.

// Public exports
pub mod contract;
pub use contract::{
    client::SettingsApi, error::SettingsError, ResolvedSetting, SettingSource,
};

pub mod config;
pub use config::Config;

pub use api::native::NativeClient;
pub use domain::{Settings, SettingsMap};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
