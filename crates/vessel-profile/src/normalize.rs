//! Axis and baseline alignment.

use vessel_kernel_math::{Bounds2, Point2, Transform2};

use crate::clean::resample_uniform_by_y;

/// Transform that normalizes `points`, or `None` for an empty slice.
///
/// Composed from three passes, applied in order:
/// 1. shift radii so the minimum is 0
/// 2. mirror heights about the maximum if the first point is above the last
/// 3. shift heights so the minimum is 0
pub fn normalizing_transform(points: &[Point2]) -> Option<Transform2> {
    let bounds = Bounds2::from_points(points)?;
    let first = points[0];
    let last = points[points.len() - 1];

    let to_axis = Transform2::translation(-bounds.min.x, 0.0);
    let (flip, min_y) = if first.y > last.y {
        // y -> max_y - y puts the old maximum at 0, so no further shift.
        (Transform2::mirror_y(bounds.max.y), 0.0)
    } else {
        (Transform2::identity(), bounds.min.y)
    };
    let to_base = Transform2::translation(0.0, -min_y);

    Some(to_base.then(&flip).then(&to_axis))
}

/// Normalize a point sequence so radii and heights start at 0 and the
/// sequence runs upward.
///
/// Sequences with fewer than 2 points are returned unchanged. The result is
/// a no-op for already normalized input.
pub fn normalize(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let Some(t) = normalizing_transform(points) else {
        return points.to_vec();
    };
    points.iter().map(|p| snap_zero(t.apply_point(p))).collect()
}

/// [`normalize`] followed by uniform resampling by height, when `target` is
/// at least 2.
pub fn normalize_with_resample(points: &[Point2], target: Option<usize>) -> Vec<Point2> {
    let normalized = normalize(points);
    match target {
        Some(n) if n >= 2 => resample_uniform_by_y(&normalized, n),
        _ => normalized,
    }
}

/// Clear negative zero left over from subtraction.
fn snap_zero(p: Point2) -> Point2 {
    Point2::new(p.x + 0.0, p.y + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_shift_to_axis_and_base() {
        let out = normalize(&[p(10.0, 5.0), p(20.0, 15.0), p(15.0, 25.0)]);
        assert_eq!(out, vec![p(0.0, 0.0), p(10.0, 10.0), p(5.0, 20.0)]);
    }

    #[test]
    fn test_flip_upside_down() {
        // SVG style: y grows downward, so the base is drawn at the bottom.
        let out = normalize(&[p(0.0, 100.0), p(40.0, 100.0), p(30.0, 0.0)]);
        assert_eq!(out, vec![p(0.0, 0.0), p(40.0, 0.0), p(30.0, 100.0)]);
        assert!(out[0].y <= out[out.len() - 1].y);
    }

    #[test]
    fn test_flip_with_offset_heights() {
        let out = normalize(&[p(5.0, 60.0), p(6.0, 30.0), p(7.0, 20.0)]);
        assert_relative_eq!(out[0].y, 0.0);
        assert_relative_eq!(out[1].y, 30.0);
        assert_relative_eq!(out[2].y, 40.0);
        assert_relative_eq!(out[0].x, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize(&[p(-3.0, 9.0), p(4.0, 2.0), p(1.0, -7.0)]);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_short_input_unchanged() {
        assert!(normalize(&[]).is_empty());
        assert_eq!(normalize(&[p(3.0, 4.0)]), vec![p(3.0, 4.0)]);
    }

    #[test]
    fn test_no_negative_zero() {
        let out = normalize(&[p(0.0, 0.0), p(2.0, 2.0)]);
        assert!(out[0].x.is_sign_positive());
        assert!(out[0].y.is_sign_positive());
    }

    #[test]
    fn test_with_resample() {
        let out = normalize_with_resample(&[p(5.0, 10.0), p(15.0, 0.0)], Some(3));
        assert_eq!(out.len(), 3);
        assert_relative_eq!(out[1].y, 5.0);
        assert_relative_eq!(out[1].x, 5.0);

        let plain = normalize_with_resample(&[p(5.0, 10.0), p(15.0, 0.0)], None);
        assert_eq!(plain.len(), 2);
    }
}
