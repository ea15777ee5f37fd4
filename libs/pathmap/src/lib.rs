//! Dot-path addressed maps
//!
//! A [`PathMap`] stores a tree of ordered mappings and addresses its nodes with
//! delimiter-joined path strings such as `dir.public.assets`. Writing below a
//! scalar keeps the scalar as the node's own value instead of discarding it;
//! that value is rendered under the [`VALUE_KEY`] marker when the raw tree is
//! requested.

pub mod error;
pub mod key;
pub mod map;
pub mod options;

mod node;

pub use error::{PathMapError, Result};
pub use key::{GetMode, PathKey};
pub use map::PathMap;
pub use node::VALUE_KEY;
pub use options::PathMapOptions;

/// Delimiter used when none is configured
pub const DEFAULT_DELIMITER: &str = ".";
