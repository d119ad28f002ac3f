//! Error types for profile acquisition.

use thiserror::Error;
use vessel_path::PathError;

/// Errors that can occur while turning a source into a profile.
///
/// Budget overruns are not errors: they are reported through the
/// `truncated` flag and the partial profile is still returned.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// I/O error reading a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// The document has no path, polyline, polygon, line or rect element
    /// that yields points.
    #[error("no usable profile source in document")]
    NoProfileSource,

    /// Fewer than three points survived cleaning and padding was impossible.
    #[error("insufficient points for a profile: found {found}, need at least 3")]
    InsufficientPoints {
        /// Number of points available.
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at index {0}")]
    NonFinite(usize),

    /// A vessel dimension is out of range.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Invalid pipeline configuration.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
