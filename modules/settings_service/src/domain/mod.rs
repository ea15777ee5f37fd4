//! Domain layer - business logic and services

pub mod defaults;
pub mod service;
pub mod storage;

pub use service::Settings;
pub use storage::SettingsMap;
