//! Import of complete vector documents from disk.

use std::path::PathBuf;

use vessel_path::PipelineConfig;
use vessel_profile::{import_file, SourceKind};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_import_vase_document() {
    let config = PipelineConfig::default();
    let imported = import_file(fixture("vase.svg"), &config).unwrap();
    let report = &imported.report;

    // The tall outline beats the horizontal guide line; the rect is ignored
    // because a usable path exists.
    assert_eq!(report.source_kind, SourceKind::Path);
    assert_eq!(report.source_index, 0);
    assert!(!report.truncated);
    assert!(report.raw_points > 20);
    assert!((report.y_range - 270.0).abs() < 1e-6);

    let profile = &imported.profile;
    assert_eq!(profile.len(), config.target_points);
    assert!(profile.points().iter().all(|p| p.x >= 0.0 && p.y >= 0.0));
    assert!(profile.points().iter().all(|p| p.x.is_finite() && p.y.is_finite()));

    // Drawn with the foot at the bottom of the page, so it is flipped to
    // start at height 0 and run upward.
    let first = profile.first();
    let last = profile.last();
    assert_eq!(first.y, 0.0);
    assert!((last.y - 270.0).abs() < 1e-6);
    assert!(first.y <= last.y);
}

#[test]
fn test_safe_mode_uses_fewer_points() {
    let default = import_file(fixture("vase.svg"), &PipelineConfig::default()).unwrap();
    let safe = import_file(fixture("vase.svg"), &PipelineConfig::safe()).unwrap();
    assert!(safe.report.raw_points < default.report.raw_points);
    assert_eq!(safe.profile.len(), PipelineConfig::safe().target_points);
}
