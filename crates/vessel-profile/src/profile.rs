//! Normalized vessel profile type.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use vessel_kernel_math::{Bounds2, Point2, Transform2};

use crate::dimensions::check_positive;
use crate::error::{ProfileError, Result};

/// Minimum number of points a revolvable profile must have.
pub const MIN_PROFILE_POINTS: usize = 3;

/// An ordered sequence of (radius, height) points to be revolved about the
/// y-axis.
///
/// A profile always has at least three finite points. It is immutable once
/// built: re-importing or re-applying produces a new profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2>", into = "Vec<Point2>")]
pub struct Profile {
    points: Vec<Point2>,
}

impl Profile {
    /// Create a profile from points.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are fewer than three points
    /// - Any coordinate is NaN or infinite
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < MIN_PROFILE_POINTS {
            return Err(ProfileError::InsufficientPoints {
                found: points.len(),
            });
        }
        if let Some(i) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(ProfileError::NonFinite(i));
        }
        Ok(Self { points })
    }

    /// The points, in profile order.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Consume the profile, returning its points.
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point.
    pub fn first(&self) -> Point2 {
        self.points[0]
    }

    /// Last point.
    pub fn last(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// Axis-aligned bounds.
    pub fn bounds(&self) -> Bounds2 {
        // Non-empty by construction.
        Bounds2::from_points(&self.points).unwrap_or(Bounds2 {
            min: Point2::origin(),
            max: Point2::origin(),
        })
    }

    /// Largest radius.
    pub fn max_radius(&self) -> f64 {
        self.bounds().max.x
    }

    /// Height from the lowest to the highest point.
    pub fn height(&self) -> f64 {
        self.bounds().height()
    }

    /// Apply an affine transform to every point.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NonFinite`] if the transform produces a NaN or
    /// infinite coordinate.
    pub fn transformed(&self, t: &Transform2) -> Result<Self> {
        Self::new(self.points.iter().map(|p| t.apply_point(p)).collect())
    }

    /// Scale so the profile is `height` tall and `diameter` across at its
    /// widest point. An axis with zero extent is left unscaled.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidDimension`] unless both targets are
    /// positive and finite.
    pub fn scaled_to(&self, height: f64, diameter: f64) -> Result<Self> {
        check_positive("height", height)?;
        check_positive("diameter", diameter)?;
        let b = self.bounds();
        let sx = if b.max.x > 0.0 {
            (diameter / 2.0) / b.max.x
        } else {
            1.0
        };
        let sy = if b.height() > 0.0 {
            height / b.height()
        } else {
            1.0
        };
        self.transformed(&Transform2::scale(sx, sy))
    }

    /// Volume of the solid swept by revolving the profile about the y-axis,
    /// in cubic profile units.
    ///
    /// The profile is closed through the axis; each segment contributes the
    /// signed volume of a conical frustum.
    pub fn enclosed_volume(&self) -> f64 {
        let sum: f64 = self
            .points
            .windows(2)
            .map(|w| {
                let (a, b) = (w[0], w[1]);
                (a.x * a.x + a.x * b.x + b.x * b.x) * (b.y - a.y)
            })
            .sum();
        (PI / 3.0 * sum).abs()
    }
}

impl TryFrom<Vec<Point2>> for Profile {
    type Error = ProfileError;

    fn try_from(points: Vec<Point2>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<Profile> for Vec<Point2> {
    fn from(profile: Profile) -> Self {
        profile.points
    }
}
