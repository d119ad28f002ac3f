//! Geometric cleanup of raw vertex sequences.
//!
//! Each stage is a standalone function so it can be exercised on its own;
//! [`clean_profile`] chains them in the order the import pipeline needs:
//!
//! 1. distance dedupe
//! 2. collinear simplification
//! 3. relaxed dedupe of the raw input if simplification left fewer than 3 points
//! 4. even-stride decimation above the point cap
//! 5. midpoint padding of a 2-point result

use tracing::debug;
use vessel_kernel_math::{midpoint, triangle_area2, Point2};
use vessel_path::PipelineConfig;

/// Distance below which consecutive points are merged.
pub const DEDUPE_EPSILON: f64 = 0.01;

/// Dedupe distance used when simplification was too aggressive.
pub const RELAXED_DEDUPE_EPSILON: f64 = 0.0001;

/// Twice-area below which a middle point counts as collinear.
pub const COLLINEAR_TOLERANCE: f64 = 0.05;

/// Height span below which uniform resampling is skipped.
const FLAT_SPAN: f64 = 1e-9;

/// Height difference below which two bracketing points are treated as level.
const LEVEL_EPSILON: f64 = 1e-12;

/// Drop every point within `eps` of the previously kept point.
///
/// The first point is always kept.
pub fn dedupe_by_distance(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        match out.last() {
            Some(prev) if (p - prev).norm() <= eps => {}
            _ => out.push(*p),
        }
    }
    out
}

/// Drop middle points that are nearly collinear with their neighbours.
///
/// The triangle is formed by the last kept point, the candidate and the next
/// raw point. Endpoints are always kept; inputs shorter than 3 points are
/// returned unchanged.
pub fn collinear_simplify(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = vec![points[0]];
    for i in 1..points.len() - 1 {
        let a = out[out.len() - 1];
        if triangle_area2(&a, &points[i], &points[i + 1]) > tolerance {
            out.push(points[i]);
        }
    }
    out.push(points[points.len() - 1]);
    out
}

/// Pick `max(3, target)` points at evenly spaced indices.
///
/// Inputs already at or below that count are returned unchanged. The first
/// and last points always survive.
pub fn decimate_even(points: &[Point2], target: usize) -> Vec<Point2> {
    let m = target.max(3);
    if points.len() <= m {
        return points.to_vec();
    }
    let last = (points.len() - 1) as f64;
    (0..m)
        .map(|i| {
            let idx = ((i as f64 / (m - 1) as f64) * last).round() as usize;
            points[idx.min(points.len() - 1)]
        })
        .collect()
}

/// Insert the midpoint of a 2-point sequence; other lengths are unchanged.
pub fn pad_midpoint(points: &[Point2]) -> Vec<Point2> {
    match points {
        [a, b] => vec![*a, midpoint(a, b), *b],
        _ => points.to_vec(),
    }
}

/// Resample to `target` points evenly spaced in height.
///
/// Points are sorted by height, then the radius at each sample height is
/// interpolated between the bracketing points. Level brackets take the
/// larger radius so rims and shoulders survive. Radii are clamped to be
/// non-negative.
///
/// With fewer than 2 points or a target below 2 the input is returned as is.
/// A profile with no height span is returned sorted but not resampled.
pub fn resample_uniform_by_y(points: &[Point2], target: usize) -> Vec<Point2> {
    if points.len() < 2 || target < 2 {
        return points.to_vec();
    }
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));

    let min_y = sorted[0].y;
    let max_y = sorted[sorted.len() - 1].y;
    if !min_y.is_finite() || !max_y.is_finite() || (max_y - min_y).abs() < FLAT_SPAN {
        return sorted;
    }

    let mut out = Vec::with_capacity(target);
    let mut j = 0;
    for i in 0..target {
        let y = min_y + (i as f64 / (target - 1) as f64) * (max_y - min_y);
        while j < sorted.len() - 2 && y > sorted[j + 1].y {
            j += 1;
        }
        let a = sorted[j];
        let b = sorted[j + 1];
        let dy = b.y - a.y;
        let x = if dy.abs() < LEVEL_EPSILON {
            a.x.max(b.x)
        } else {
            let t = (y - a.y) / dy;
            a.x + t * (b.x - a.x)
        };
        out.push(Point2::new(x.max(0.0), y));
    }
    out
}

/// Result of [`clean_profile`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    /// Cleaned points. May still hold fewer than 3 points for 0- or 1-point input.
    pub points: Vec<Point2>,
    /// The relaxed dedupe fallback replaced the simplified sequence.
    pub relaxed: bool,
    /// The sequence exceeded the point cap and was decimated.
    pub decimated: bool,
    /// A midpoint was inserted into a 2-point result.
    pub padded: bool,
}

/// Run the cleanup stages in order.
pub fn clean_profile(raw: &[Point2], config: &PipelineConfig) -> CleanOutcome {
    let simplified = collinear_simplify(&dedupe_by_distance(raw, DEDUPE_EPSILON), COLLINEAR_TOLERANCE);

    let relaxed = simplified.len() < 3;
    let mut points = if relaxed {
        debug!(
            simplified = simplified.len(),
            "simplification left fewer than 3 points, relaxing dedupe"
        );
        dedupe_by_distance(raw, RELAXED_DEDUPE_EPSILON)
    } else {
        simplified
    };

    let decimated = points.len() > config.point_cap;
    if decimated {
        debug!(
            from = points.len(),
            to = config.target_points,
            "decimating profile"
        );
        points = decimate_even(&points, config.target_points);
    }

    let padded = points.len() == 2;
    if padded {
        points = pad_midpoint(&points);
    }

    CleanOutcome {
        points,
        relaxed,
        decimated,
        padded,
    }
}
