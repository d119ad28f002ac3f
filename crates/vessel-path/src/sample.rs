//! Bezier evaluation and adaptive curve sampling.
//!
//! Samples are taken at `t = s / n` for `s = 1..=n`, so the start point of
//! a segment is never repeated (the interpreter has already emitted it) and
//! the last sample lands exactly on the segment end.

use vessel_kernel_math::Point2;

use crate::arc::CenterArc;
use crate::config::{SampleBounds, ARC_LENGTH_PER_SAMPLE};

/// Guards the complexity ratio against zero-length chords.
const CHORD_EPSILON: f64 = 1e-6;

/// Evaluate a quadratic Bezier at `t` (Bernstein form).
pub fn quadratic_point(p0: &Point2, p1: &Point2, p2: &Point2, t: f64) -> Point2 {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point2::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

/// Evaluate a cubic Bezier at `t` (Bernstein form).
pub fn cubic_point(p0: &Point2, p1: &Point2, p2: &Point2, p3: &Point2, t: f64) -> Point2 {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point2::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// How much a control polygon deviates from its chord, in `[0, 1]`.
///
/// `clamp01((polygon_length - chord) / (chord + ε))`.
pub fn complexity(control_polygon: &[Point2]) -> f64 {
    let (Some(first), Some(last)) = (control_polygon.first(), control_polygon.last()) else {
        return 0.0;
    };
    let chord = (last - first).norm();
    let polygon: f64 = control_polygon
        .windows(2)
        .map(|w| (w[1] - w[0]).norm())
        .sum();
    ((polygon - chord) / (chord + CHORD_EPSILON)).clamp(0.0, 1.0)
}

/// Sample count for a quadratic segment.
pub fn adaptive_quadratic_samples(bounds: SampleBounds, p0: &Point2, p1: &Point2, p2: &Point2) -> usize {
    bounds.count_for(complexity(&[*p0, *p1, *p2]))
}

/// Sample count for a cubic segment.
pub fn adaptive_cubic_samples(
    bounds: SampleBounds,
    p0: &Point2,
    p1: &Point2,
    p2: &Point2,
    p3: &Point2,
) -> usize {
    bounds.count_for(complexity(&[*p0, *p1, *p2, *p3]))
}

/// Sample count for an arc: estimated length over a fixed length per sample.
pub fn adaptive_arc_samples(bounds: SampleBounds, arc: &CenterArc) -> usize {
    let n = (arc.estimated_length() / ARC_LENGTH_PER_SAMPLE).round();
    if !n.is_finite() {
        return bounds.max;
    }
    (n as usize).clamp(bounds.min, bounds.max.max(bounds.min))
}

/// Sample a quadratic Bezier at `n` evenly spaced parameters in `(0, 1]`.
pub fn sample_quadratic(p0: &Point2, p1: &Point2, p2: &Point2, n: usize) -> Vec<Point2> {
    (1..=n)
        .map(|s| quadratic_point(p0, p1, p2, s as f64 / n as f64))
        .collect()
}

/// Sample a cubic Bezier at `n` evenly spaced parameters in `(0, 1]`.
pub fn sample_cubic(p0: &Point2, p1: &Point2, p2: &Point2, p3: &Point2, n: usize) -> Vec<Point2> {
    (1..=n)
        .map(|s| cubic_point(p0, p1, p2, p3, s as f64 / n as f64))
        .collect()
}

/// Sample an arc at `n` evenly spaced angles in `(start, start + sweep]`.
pub fn sample_arc(arc: &CenterArc, n: usize) -> Vec<Point2> {
    (1..=n)
        .map(|s| arc.point_at(arc.start_angle + (s as f64 / n as f64) * arc.sweep))
        .collect()
}
