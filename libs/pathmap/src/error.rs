//! Error types for path map operations

/// Errors raised by [`crate::PathMap`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathMapError {
    /// The map cannot be built with the supplied options
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation was called with an argument that violates its contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Flattening had nothing to merge
    #[error("Merge conflict: {0}")]
    MergeConflict(String),
}

pub type Result<T> = std::result::Result<T, PathMapError>;
