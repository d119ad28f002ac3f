//! Endpoint-to-center elliptical arc conversion.
//!
//! Follows the SVG implementation notes (F.6.5 / F.6.6): radii that are
//! too small for the endpoint geometry are scaled up proportionally, and
//! the sweep angle is adjusted to honour the large-arc and sweep flags.

use std::f64::consts::PI;

use vessel_kernel_math::{Point2, Tolerance};

/// An elliptical arc in center parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    /// Ellipse center.
    pub center: Point2,
    /// X radius after out-of-range correction.
    pub rx: f64,
    /// Y radius after out-of-range correction.
    pub ry: f64,
    /// Rotation of the ellipse x-axis, in radians.
    pub phi: f64,
    /// Angle of the start point, in radians.
    pub start_angle: f64,
    /// Signed sweep, in radians. Positive is the positive-angle direction.
    pub sweep: f64,
}

impl CenterArc {
    /// Point on the ellipse at parametric angle `theta`.
    pub fn point_at(&self, theta: f64) -> Point2 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_t, cos_t) = theta.sin_cos();
        Point2::new(
            self.center.x + self.rx * cos_phi * cos_t - self.ry * sin_phi * sin_t,
            self.center.y + self.rx * sin_phi * cos_t + self.ry * cos_phi * sin_t,
        )
    }

    /// Point at the end of the sweep.
    pub fn end_point(&self) -> Point2 {
        self.point_at(self.start_angle + self.sweep)
    }

    /// Arc length estimate: mean radius times absolute sweep.
    pub fn estimated_length(&self) -> f64 {
        0.5 * (self.rx.abs() + self.ry.abs()) * self.sweep.abs()
    }
}

/// Signed angle from `u` to `v`.
fn angle_between(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let dot = ux * vx + uy * vy;
    let det = ux * vy - uy * vx;
    det.atan2(dot)
}

/// Convert an endpoint arc description to center form.
///
/// `phi_degrees` is the x-axis rotation as written in path data. Returns
/// `None` for degenerate input (zero or non-finite radii, non-finite or
/// coincident endpoints); callers treat that as a straight line.
pub fn endpoint_to_center(
    from: Point2,
    to: Point2,
    rx: f64,
    ry: f64,
    phi_degrees: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<CenterArc> {
    let tol = Tolerance::DEFAULT;
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if !rx.is_finite() || !ry.is_finite() || rx == 0.0 || ry == 0.0 {
        return None;
    }
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return None;
    }
    if tol.points_equal(&from, &to) {
        return None;
    }

    let phi = if phi_degrees.is_finite() {
        phi_degrees.to_radians()
    } else {
        0.0
    };
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: endpoints in the ellipse's rotated frame
    let dx = (from.x - to.x) / 2.0;
    let dy = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    // Radii correction
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // Step 2: center in the rotated frame
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = (rx2 * y1p * y1p + ry2 * x1p * x1p).max(tol.denominator);
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (num / den).max(0.0).sqrt();
    let cxp = coef * (rx * y1p) / ry;
    let cyp = coef * (-ry * x1p) / rx;

    // Step 3: back to user space
    let center = Point2::new(
        cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0,
        sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0,
    );

    // Step 4: angles
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let start_angle = uy.atan2(ux);
    let mut delta = angle_between(ux, uy, vx, vy);
    if !sweep && delta > 0.0 {
        delta -= 2.0 * PI;
    } else if sweep && delta < 0.0 {
        delta += 2.0 * PI;
    }

    let finite = center.x.is_finite()
        && center.y.is_finite()
        && start_angle.is_finite()
        && delta.is_finite();
    if !finite {
        return None;
    }

    Some(CenterArc {
        center,
        rx,
        ry,
        phi,
        start_angle,
        sweep: delta,
    })
}
