//! Segment geometry: evaluation, exact subdivision and nearest-point
//! projection.

use vessel_kernel_math::{lerp, Point2, Tolerance};

/// Samples in the coarse lookup table used by [`CubicSegment::project`].
const PROJECT_LUT_STEPS: usize = 100;

/// Bisection refinements after the lookup table pass.
const PROJECT_REFINE_STEPS: usize = 24;

/// A cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    /// Start point.
    pub p0: Point2,
    /// First control point.
    pub p1: Point2,
    /// Second control point.
    pub p2: Point2,
    /// End point.
    pub p3: Point2,
}

impl CubicSegment {
    /// Create a segment from its four control points.
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate at `t` by De Casteljau's construction.
    pub fn eval(&self, t: f64) -> Point2 {
        self.subdivide(t).0.p3
    }

    /// Split at `t` into two segments that together trace exactly the
    /// same curve.
    pub fn subdivide(&self, t: f64) -> (CubicSegment, CubicSegment) {
        let p01 = lerp(&self.p0, &self.p1, t);
        let p12 = lerp(&self.p1, &self.p2, t);
        let p23 = lerp(&self.p2, &self.p3, t);
        let p012 = lerp(&p01, &p12, t);
        let p123 = lerp(&p12, &p23, t);
        let mid = lerp(&p012, &p123, t);
        (
            CubicSegment::new(self.p0, p01, p012, mid),
            CubicSegment::new(mid, p123, p23, self.p3),
        )
    }

    /// Parameter and point on the segment nearest to `p`.
    ///
    /// A lookup table pass finds the closest sample, then the estimate is
    /// refined by bisection around it.
    pub fn project(&self, p: &Point2) -> Projection {
        let dist = |t: f64| (self.eval(t) - p).norm();

        let mut best_t = 0.0;
        let mut best_d = f64::INFINITY;
        for i in 0..=PROJECT_LUT_STEPS {
            let t = i as f64 / PROJECT_LUT_STEPS as f64;
            let d = dist(t);
            if d < best_d {
                best_d = d;
                best_t = t;
            }
        }

        let mut step = 1.0 / PROJECT_LUT_STEPS as f64;
        for _ in 0..PROJECT_REFINE_STEPS {
            step /= 2.0;
            for t in [best_t - step, best_t + step] {
                let t = t.clamp(0.0, 1.0);
                let d = dist(t);
                if d < best_d {
                    best_d = d;
                    best_t = t;
                }
            }
        }

        Projection {
            t: best_t,
            point: self.eval(best_t),
            distance: best_d,
        }
    }
}

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Segment parameter in `[0, 1]`.
    pub t: f64,
    /// Nearest point on the segment.
    pub point: Point2,
    /// Distance from the query point.
    pub distance: f64,
}

/// Project `p` onto the line segment `a`–`b`, clamping to its ends.
pub fn project_on_line(a: &Point2, b: &Point2, p: &Point2) -> Projection {
    let d = b - a;
    let len2 = d.norm_squared();
    let len2 = if len2 < Tolerance::DEFAULT.denominator {
        1.0
    } else {
        len2
    };
    let t = ((p - a).dot(&d) / len2).clamp(0.0, 1.0);
    let point = lerp(a, b, t);
    Projection {
        t,
        point,
        distance: (point - p).norm(),
    }
}
