//! Path keys and read modes

use crate::error::{PathMapError, Result};
use std::fmt;

/// A path accepted at the public boundary.
///
/// Integer keys are stringified on construction, so the tree only ever holds
/// string segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(String);

impl PathKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Keys that index-style assignment treats as "no key": empty or `"0"`
    pub fn is_falsy(&self) -> bool {
        self.0.is_empty() || self.0 == "0"
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for PathKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for PathKey {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<&PathKey> for PathKey {
    fn from(value: &PathKey) -> Self {
        value.clone()
    }
}

macro_rules! path_key_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PathKey {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

path_key_from_unsigned!(u8, u16, u32, u64, usize);

/// How [`crate::PathMap::get`] renders the node it resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetMode {
    /// Default: a node holding a value yields that value, otherwise the
    /// mapping with markers stripped
    Value,
    /// Trailing `.`: the mapping with markers stripped at every depth
    Array,
    /// Trailing `:`: the subtree verbatim, markers included
    All,
}

impl GetMode {
    /// Split a read path into its lookup key and mode.
    ///
    /// The mode comes from the last character; every leading and trailing
    /// `.` or `:` is trimmed from the key.
    pub fn parse(path: &str) -> Result<(&str, GetMode)> {
        if path.is_empty() {
            return Err(PathMapError::InvalidArgument(
                "path cannot be empty".to_string(),
            ));
        }

        let mode = match path.chars().last() {
            Some('.') => GetMode::Array,
            Some(':') => GetMode::All,
            _ => GetMode::Value,
        };

        Ok((path.trim_matches(|c| c == '.' || c == ':'), mode))
    }
}
