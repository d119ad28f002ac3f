//! Error types for path interpretation.

use thiserror::Error;

/// Errors that can occur when configuring path interpretation.
///
/// Malformed path text never produces an error: unparseable fragments are
/// skipped and degenerate arcs become straight lines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Invalid pipeline configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
