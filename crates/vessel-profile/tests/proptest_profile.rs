//! Property-based tests for profile cleaning and normalization.
//!
//! Run with: cargo test -p vessel-profile -- proptest

use proptest::prelude::*;
use vessel_kernel_math::Point2;
use vessel_path::PipelineConfig;
use vessel_profile::{clean_profile, dedupe_by_distance, normalize, resample_uniform_by_y};

// =============================================================================
// Strategies
// =============================================================================

/// Coordinates on a quarter-unit grid so comparisons stay exact.
fn arb_point() -> impl Strategy<Value = Point2> {
    (-400i32..400, -400i32..400).prop_map(|(x, y)| Point2::new(x as f64 / 4.0, y as f64 / 4.0))
}

fn arb_points(max: usize) -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec(arb_point(), 0..max)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_dedupe_idempotent(points in arb_points(60), eps in 0.0..5.0f64) {
        let once = dedupe_by_distance(&points, eps);
        let twice = dedupe_by_distance(&once, eps);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn proptest_dedupe_spacing(points in arb_points(60), eps in 0.0..5.0f64) {
        let out = dedupe_by_distance(&points, eps);
        prop_assert!(out.windows(2).all(|w| (w[1] - w[0]).norm() > eps));
    }

    #[test]
    fn proptest_normalize_idempotent(points in arb_points(40)) {
        let once = normalize(&points);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn proptest_normalize_anchors_and_orients(points in arb_points(40)) {
        prop_assume!(points.len() >= 2);
        let out = normalize(&points);
        let min_x = out.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = out.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        prop_assert_eq!(min_x, 0.0);
        prop_assert_eq!(min_y, 0.0);
        prop_assert!(out[0].y <= out[out.len() - 1].y);
    }

    #[test]
    fn proptest_clean_reaches_three_points(points in arb_points(80)) {
        let out = clean_profile(&points, &PipelineConfig::default());
        let distinct = dedupe_by_distance(&points, 0.0001).len();
        if distinct >= 2 {
            prop_assert!(out.points.len() >= 3);
        }
        prop_assert!(out.points.len() <= PipelineConfig::default().point_cap);
    }

    #[test]
    fn proptest_resample_heights_evenly_spaced(points in arb_points(40), target in 2usize..60) {
        prop_assume!(points.len() >= 2);
        prop_assume!(points.iter().any(|p| p.y != points[0].y));
        let out = resample_uniform_by_y(&points, target);
        prop_assert_eq!(out.len(), target);
        let step = out[1].y - out[0].y;
        prop_assert!(step > 0.0);
        for w in out.windows(2) {
            prop_assert!(((w[1].y - w[0].y) - step).abs() < 1e-9);
        }
        prop_assert!(out.iter().all(|p| p.x >= 0.0));
    }
}
