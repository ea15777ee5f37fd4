//! Domain service - layered settings resolution and write guards

use super::defaults;
use super::storage::SettingsMap;
use crate::config::Config;
use crate::contract::{ResolvedSetting, SettingSource, SettingsError};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use pathmap::{PathMapError, VALUE_KEY};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Mutable state, guarded as a whole
struct State {
    storage: SettingsMap,
    /// Settings that refuse runtime changes
    locked: HashSet<String>,
    frozen: bool,
}

impl State {
    /// Writing `setting` replaces everything below it, so a locked
    /// descendant refuses the write too
    fn refusal(&self, setting: &str, delimiter: &str) -> Option<SettingsError> {
        if self.frozen {
            return Some(SettingsError::Frozen {
                setting: setting.to_string(),
            });
        }
        let covers_lock = self.locked.iter().any(|locked| {
            locked == setting
                || locked
                    .strip_prefix(setting)
                    .is_some_and(|rest| rest.starts_with(delimiter))
        });
        if covers_lock {
            return Some(SettingsError::Locked {
                setting: setting.to_string(),
            });
        }
        None
    }
}

/// Domain service for settings management.
///
/// Reads resolve in order: stored value, generated directory, static
/// default. Not `Clone`; share one instance behind an `Arc`.
pub struct Settings {
    state: RwLock<State>,
    project_root: PathBuf,
    delimiter: String,
    throw_on_error: bool,
}

impl Settings {
    /// Create a new service instance seeded with `initial`
    pub fn new(initial: Value, config: Config) -> Result<Self, SettingsError> {
        let locked = if config.lock_injected {
            top_level_keys(&initial)
        } else {
            HashSet::new()
        };
        let storage = SettingsMap::new(initial, &config.delimiter)?;

        let project_root = config.root_dir.unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });

        tracing::info!(
            settings = storage.len(),
            locked = locked.len(),
            root = %project_root.display(),
            "Settings initialized"
        );

        Ok(Self {
            state: RwLock::new(State {
                storage,
                locked,
                frozen: config.freeze.unwrap_or(false),
            }),
            project_root,
            delimiter: config.delimiter,
            throw_on_error: config.throw_on_error,
        })
    }

    // ===== Reads =====

    /// Resolve a setting value
    pub fn get(&self, setting: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.resolve(setting)?.map(|resolved| resolved.value))
    }

    /// Resolve a setting and report which layer produced it
    pub fn resolve(&self, setting: &str) -> Result<Option<ResolvedSetting>, SettingsError> {
        tracing::info!(setting, "Requested setting");

        let resolved = self.lookup(setting)?;
        match &resolved {
            Some(found) => tracing::info!(
                setting,
                source = ?found.source,
                value = %found.value,
                "Setting resolved"
            ),
            None => tracing::info!(setting, "Setting not found"),
        }

        Ok(resolved)
    }

    fn lookup(&self, setting: &str) -> Result<Option<ResolvedSetting>, SettingsError> {
        let state = self.state.upgradable_read();
        let generated_suffix = defaults::generated_suffix(setting);

        let stored = stored_value(&state.storage, setting)?;
        // a mapping without its own value at a generated path only holds
        // cached children
        let below_only =
            generated_suffix.is_some() && stored.as_ref().is_some_and(Value::is_object);
        if let Some(value) = stored.filter(|_| !below_only) {
            return Ok(Some(ResolvedSetting::new(
                setting,
                value,
                SettingSource::Stored,
            )));
        }

        if let Some(suffix) = generated_suffix {
            let root = stored_value(&state.storage, "dir.root")?
                .and_then(|value| value.as_str().map(str::to_string))
                .unwrap_or_else(|| self.project_root.to_string_lossy().into_owned());
            let generated = defaults::normalize_path(&root, suffix);

            tracing::info!(setting, result = %generated, "Generated setting");

            if state.frozen {
                return Ok(Some(ResolvedSetting::new(
                    setting,
                    Value::String(generated),
                    SettingSource::Generated,
                )));
            }

            // cache the first generation
            let mut state = RwLockUpgradableReadGuard::upgrade(state);
            if below_only {
                let own_value = format!("{}{}{}", setting, self.delimiter, VALUE_KEY);
                state.storage.set(own_value, generated);
            } else {
                state.storage.set(setting, generated);
            }
            return Ok(stored_value(&state.storage, setting)?
                .map(|value| ResolvedSetting::new(setting, value, SettingSource::Generated)));
        }

        Ok(defaults::default_value(setting)
            .map(|value| ResolvedSetting::new(setting, value, SettingSource::Default)))
    }

    /// Snapshot of everything stored, markers included
    pub fn all(&self) -> Value {
        self.state.read().storage.all()
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    // ===== Writes =====

    /// Store a setting.
    ///
    /// Returns `Ok(false)` when the setting is locked or the store is frozen,
    /// or the matching error when `throw_on_error` is configured.
    pub fn set(&self, setting: &str, value: impl Into<Value>) -> Result<bool, SettingsError> {
        let mut state = self.state.write();
        if let Some(refusal) = state.refusal(setting, &self.delimiter) {
            return self.refuse(refusal);
        }

        state.storage.set(setting, value);
        tracing::debug!(setting, "Setting stored");
        Ok(true)
    }

    /// Store several settings. Each one is guarded on its own, so earlier
    /// ones stay stored when a later one is refused. Returns whether all
    /// were stored.
    pub fn set_many<I, K, V>(&self, settings: I) -> Result<bool, SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut stored_all = true;
        for (setting, value) in settings {
            stored_all &= self.set(setting.as_ref(), value)?;
        }
        Ok(stored_all)
    }

    /// Store a setting unless it already has a stored value.
    ///
    /// Returns `Ok(false)` when it exists, is locked, or the store is frozen.
    pub fn add(&self, setting: &str, value: impl Into<Value>) -> Result<bool, SettingsError> {
        let mut state = self.state.write();
        if let Some(refusal) = state.refusal(setting, &self.delimiter) {
            return self.refuse(refusal);
        }

        if stored_value(&state.storage, setting)?.is_some() {
            tracing::debug!(setting, "Setting exists, not adding");
            return Ok(false);
        }

        state.storage.set(setting, value);
        tracing::debug!(setting, "Setting added");
        Ok(true)
    }

    pub fn add_many<I, K, V>(&self, settings: I) -> Result<bool, SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut added_all = true;
        for (setting, value) in settings {
            added_all &= self.add(setting.as_ref(), value)?;
        }
        Ok(added_all)
    }

    /// Fill in missing settings from a mapping of setting name to value.
    ///
    /// Locks and the freeze flag are not consulted. With `lock` the injected
    /// names become locked.
    pub fn inject_settings(&self, settings: Value, lock: bool) -> Result<(), SettingsError> {
        let Value::Object(entries) = settings else {
            return Err(SettingsError::Validation {
                message: "injected settings must be a mapping".to_string(),
            });
        };

        let mut state = self.state.write();
        if lock {
            state.locked.extend(entries.keys().cloned());
        }

        let count = entries.len();
        state.storage.add_many(entries)?;
        tracing::info!(count, lock, "Injected settings");
        Ok(())
    }

    // ===== Locking =====

    /// Lock a setting against runtime changes
    pub fn lock(&self, setting: &str) {
        self.state.write().locked.insert(setting.to_string());
    }

    pub fn unlock(&self, setting: &str) {
        self.state.write().locked.remove(setting);
    }

    pub fn is_locked(&self, setting: &str) -> bool {
        self.state.read().locked.contains(setting)
    }

    /// Freeze the whole store. There is no way back.
    pub fn freeze(&self) {
        self.state.write().frozen = true;
        tracing::info!("Settings frozen");
    }

    pub fn is_frozen(&self) -> bool {
        self.state.read().frozen
    }

    fn refuse(&self, refusal: SettingsError) -> Result<bool, SettingsError> {
        tracing::warn!(error = %refusal, "Refused setting change");
        if self.throw_on_error {
            Err(refusal)
        } else {
            Ok(false)
        }
    }
}

/// Stored value, treating `null` as absent
fn stored_value(storage: &SettingsMap, setting: &str) -> Result<Option<Value>, PathMapError> {
    Ok(storage.get(setting)?.filter(|value| !value.is_null()))
}

fn top_level_keys(initial: &Value) -> HashSet<String> {
    initial
        .as_object()
        .map(|entries| entries.keys().cloned().collect())
        .unwrap_or_default()
}
