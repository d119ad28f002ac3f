#![warn(missing_docs)]

//! Profile acquisition for revolved vessels.
//!
//! Turns path data or whole vector documents into a normalized
//! (radius, height) [`Profile`] ready to be revolved about the y-axis:
//!
//! - [`source`]: pick the best shape element of a document
//! - [`clean`]: dedupe, simplify, decimate, pad and resample
//! - [`normalize`]: align to the axis and baseline, flipping upside-down input
//! - [`pipeline`]: the stages chained end to end, with an [`ImportReport`]
//! - [`dimensions`]: volume, height and diameter coupling
//!
//! # Example
//!
//! ```
//! use vessel_path::PipelineConfig;
//! use vessel_profile::profile_from_path;
//!
//! let profile = profile_from_path("M0,0 L50,0 L50,100 L0,100 Z", &PipelineConfig::default()).unwrap();
//! assert_eq!(profile.len(), 5);
//! assert_eq!(profile.max_radius(), 50.0);
//! ```

pub mod clean;
pub mod dimensions;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod source;

pub use clean::{
    clean_profile, collinear_simplify, decimate_even, dedupe_by_distance, pad_midpoint,
    resample_uniform_by_y, CleanOutcome,
};
pub use dimensions::VesselDimensions;
pub use error::{ProfileError, Result};
pub use normalize::{normalize, normalize_with_resample};
pub use pipeline::{
    clean_and_normalize, import_document, import_file, import_path_data, profile_from_editor_path,
    profile_from_path, ImportReport, ImportedProfile,
};
pub use profile::{Profile, MIN_PROFILE_POINTS};
pub use source::{select_source, SelectedSource, SourceDocument, SourceElement, SourceKind};
