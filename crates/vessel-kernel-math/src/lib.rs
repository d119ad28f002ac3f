#![warn(missing_docs)]

//! Math types for the vessel profile kernel.
//!
//! Thin wrappers around nalgebra providing the 2D types used throughout
//! profile acquisition: points in (radius, height) space, vectors,
//! affine transforms, bounds and tolerance constants.

use nalgebra::{Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A point in the profile plane. `x` is the radial distance from the axis
/// of revolution, `y` the height along it.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Linear interpolation between two points at parameter `t`.
#[inline]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    lerp(a, b, 0.5)
}

/// Twice the unsigned area of the triangle `a, b, c`.
#[inline]
pub fn triangle_area2(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs()
}

/// Reflect `p` through `center` (`2 * center - p`).
#[inline]
pub fn reflect(p: &Point2, center: &Point2) -> Point2 {
    Point2::new(2.0 * center.x - p.x, 2.0 * center.y - p.y)
}

/// A 3x3 affine transformation matrix acting on the profile plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2 {
    /// The underlying homogeneous matrix.
    pub matrix: Matrix3<f64>,
}

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Translation by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 2)] = dx;
        m[(1, 2)] = dy;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy)` about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        Self { matrix: m }
    }

    /// Mirror heights about the horizontal line `y = axis`.
    pub fn mirror_y(axis: f64) -> Self {
        Self::translation(0.0, axis).then(&Self::scale(1.0, -1.0))
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform2) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        let v = self.matrix * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v.x, v.y)
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Bounds2 {
    /// Bounds of `points`, or `None` when the slice is empty.
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in profile units.
    pub linear: f64,
    /// Tolerance used to guard divisions by near-zero lengths.
    pub denominator: f64,
}

impl Tolerance {
    /// Default profile tolerances (1e-9 linear, 1e-12 for denominators).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        denominator: 1e-12,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_transform() {
        let t = Transform2::identity();
        let p = Point2::new(1.0, 2.0);
        assert!((t.apply_point(&p) - p).norm() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform2::translation(5.0, -3.0);
        let p = t.apply_point(&Point2::new(1.0, 1.0));
        assert_relative_eq!(p.x, 6.0);
        assert_relative_eq!(p.y, -2.0);
    }

    #[test]
    fn test_mirror_y() {
        let t = Transform2::mirror_y(10.0);
        let p = t.apply_point(&Point2::new(3.0, 2.0));
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 8.0);

        // Mirroring twice is the identity.
        let q = t.apply_point(&p);
        assert_relative_eq!(q.y, 2.0);
    }

    #[test]
    fn test_then_applies_other_first() {
        let t = Transform2::translation(2.0, 3.0).then(&Transform2::scale(2.0, 4.0));
        let p = t.apply_point(&Point2::new(7.0, -1.0));
        assert_relative_eq!(p.x, 16.0);
        assert_relative_eq!(p.y, -1.0);
    }

    #[test]
    fn test_bounds() {
        let pts = vec![
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ];
        let b = Bounds2::from_points(&pts).unwrap();
        assert_relative_eq!(b.width(), 6.0);
        assert_relative_eq!(b.height(), 6.0);
        assert!(Bounds2::from_points(&[]).is_none());
    }

    #[test]
    fn test_helpers() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 10.0);
        assert_eq!(midpoint(&a, &b), Point2::new(5.0, 5.0));
        let l = lerp(&a, &b, 0.3);
        assert_relative_eq!(l.x, 3.0);
        assert_relative_eq!(l.y, 3.0);
        assert_eq!(reflect(&Point2::new(1.0, 2.0), &Point2::new(3.0, 3.0)), Point2::new(5.0, 4.0));
        assert_relative_eq!(triangle_area2(&a, &b, &Point2::new(10.0, 0.0)), 100.0);
    }

    #[test]
    fn test_point_json_is_plain_numbers() {
        let p = Point2::new(1.5, 2.25);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[1.5,2.25]");
        let back: Point2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
