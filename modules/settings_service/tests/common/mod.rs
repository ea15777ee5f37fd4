//! Common test utilities and shared fixtures

#![allow(dead_code)]

use serde_json::{json, Value};
use settings_service::{Config, Settings};
use std::path::PathBuf;
use std::sync::Arc;

/// Project root used by every fixture
pub const PROJECT_ROOT: &str = "/srv/app";

/// Install a test-friendly tracing subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn config() -> Config {
    Config {
        root_dir: Some(PathBuf::from(PROJECT_ROOT)),
        ..Config::default()
    }
}

/// Settings a typical application injects at startup
pub fn app_settings() -> Value {
    json!({
        "app.name": "dashboard",
        "app.debug": false,
        "mail.transport": "smtp",
    })
}

pub fn settings_with(initial: Value, config: Config) -> Arc<Settings> {
    init_tracing();
    Arc::new(Settings::new(initial, config).unwrap())
}

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}
