//! End-to-end profile acquisition.
//!
//! Raw vertices from a path or document run through cleaning and
//! normalization and come out as a [`Profile`]. Imports additionally
//! resample uniformly by height; paths drawn in the curve editor do not.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};
use vessel_kernel_math::{Bounds2, Point2};
use vessel_path::{interpret, PipelineConfig};

use crate::clean::{clean_profile, CleanOutcome};
use crate::error::{ProfileError, Result};
use crate::normalize::{normalize, normalize_with_resample};
use crate::profile::{Profile, MIN_PROFILE_POINTS};
use crate::source::{select_source, SourceDocument, SourceKind};

/// What happened during an import.
///
/// Returned to the caller alongside the profile instead of being written to
/// shared diagnostic state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    /// Kind of element the profile came from.
    pub source_kind: SourceKind,
    /// Index of that element among elements of its kind.
    pub source_index: usize,
    /// Vertices produced by interpretation or extraction.
    pub raw_points: usize,
    /// Vertices left after cleaning.
    pub cleaned_points: usize,
    /// Vertices in the final profile.
    pub final_points: usize,
    /// Vertical span of the raw vertices.
    pub y_range: f64,
    /// Horizontal span of the raw vertices.
    pub x_range: f64,
    /// The interpreter stopped early on its vertex or time budget.
    pub truncated: bool,
    /// Simplification was too aggressive and the relaxed dedupe was used.
    pub relaxed: bool,
    /// The profile was decimated to the target point count.
    pub decimated: bool,
    /// A midpoint was added to reach three points.
    pub padded: bool,
}

/// A profile together with its import report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedProfile {
    /// The normalized profile.
    pub profile: Profile,
    /// Diagnostics for the import.
    pub report: ImportReport,
}

/// Import a profile from the text of a vector document.
pub fn import_document(xml: &str, config: &PipelineConfig) -> Result<ImportedProfile> {
    config.validate()?;
    let doc = SourceDocument::parse(xml)?;
    let selected = select_source(&doc, config)?;
    let (x_range, y_range) = (selected.x_range(), selected.y_range());
    finish_import(
        &selected.points,
        config,
        Provenance {
            kind: selected.kind,
            index: selected.index,
            truncated: selected.truncated,
            x_range,
            y_range,
        },
    )
}

/// Read a vector document from disk and import its profile.
pub fn import_file(path: impl AsRef<Path>, config: &PipelineConfig) -> Result<ImportedProfile> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading source document");
    let xml = std::fs::read_to_string(path)?;
    import_document(&xml, config)
}

/// Import a profile from bare path data, with uniform resampling.
pub fn import_path_data(d: &str, config: &PipelineConfig) -> Result<ImportedProfile> {
    config.validate()?;
    let result = interpret(d, config);
    let bounds = Bounds2::from_points(&result.vertices);
    finish_import(
        &result.vertices,
        config,
        Provenance {
            kind: SourceKind::Path,
            index: 0,
            truncated: result.truncated,
            x_range: bounds.map_or(0.0, |b| b.width()),
            y_range: bounds.map_or(0.0, |b| b.height()),
        },
    )
}

/// Build a profile from path data: interpret, clean and normalize.
///
/// No uniform resampling is applied, so straight-edged input keeps its
/// corners exactly.
pub fn profile_from_path(d: &str, config: &PipelineConfig) -> Result<Profile> {
    config.validate()?;
    let result = interpret(d, config);
    if result.truncated {
        warn!(
            vertices = result.vertices.len(),
            "path interpretation truncated"
        );
    }
    clean_and_normalize(&result.vertices, config)
}

/// Build a profile from a path serialized by the curve editor.
pub fn profile_from_editor_path(d: &str) -> Result<Profile> {
    profile_from_path(d, &PipelineConfig::drawn())
}

/// Clean and normalize raw vertices into a profile, without resampling.
pub fn clean_and_normalize(raw: &[Point2], config: &PipelineConfig) -> Result<Profile> {
    let cleaned = checked_clean(raw, config)?;
    Profile::new(normalize(&cleaned.points))
}

struct Provenance {
    kind: SourceKind,
    index: usize,
    truncated: bool,
    x_range: f64,
    y_range: f64,
}

fn checked_clean(raw: &[Point2], config: &PipelineConfig) -> Result<CleanOutcome> {
    let cleaned = clean_profile(raw, config);
    if cleaned.points.len() < MIN_PROFILE_POINTS {
        return Err(ProfileError::InsufficientPoints {
            found: cleaned.points.len(),
        });
    }
    Ok(cleaned)
}

fn finish_import(
    raw: &[Point2],
    config: &PipelineConfig,
    provenance: Provenance,
) -> Result<ImportedProfile> {
    if provenance.truncated {
        warn!(
            kind = %provenance.kind,
            index = provenance.index,
            vertices = raw.len(),
            "interpretation hit its budget, using partial result"
        );
    }

    let cleaned = checked_clean(raw, config)?;
    let target = config.target_points.min(config.point_cap);
    let profile = Profile::new(normalize_with_resample(&cleaned.points, Some(target)))?;

    let report = ImportReport {
        source_kind: provenance.kind,
        source_index: provenance.index,
        raw_points: raw.len(),
        cleaned_points: cleaned.points.len(),
        final_points: profile.len(),
        y_range: provenance.y_range,
        x_range: provenance.x_range,
        truncated: provenance.truncated,
        relaxed: cleaned.relaxed,
        decimated: cleaned.decimated,
        padded: cleaned.padded,
    };
    info!(
        kind = %report.source_kind,
        raw_points = report.raw_points,
        cleaned_points = report.cleaned_points,
        final_points = report.final_points,
        "imported profile"
    );
    Ok(ImportedProfile { profile, report })
}
