//! Pan/zoom window over the editor canvas.

use serde::{Deserialize, Serialize};
use vessel_kernel_math::Point2;

/// Narrowest allowed view width, in canvas units.
pub const MIN_VIEW_WIDTH: f64 = 40.0;

/// Widest allowed view width, in canvas units.
pub const MAX_VIEW_WIDTH: f64 = 10000.0;

/// Wheel delta to log-scale factor.
const ZOOM_RATE: f64 = 0.001;

/// Visible canvas rectangle, independent of the anchor data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 800.0,
            h: 600.0,
        }
    }
}

impl ViewBox {
    /// Create a view box.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Map a screen position to canvas coordinates.
    ///
    /// The box is fitted into the client area keeping its aspect ratio and
    /// anchored at the top-left corner.
    pub fn screen_to_canvas(&self, screen: Point2, client_w: f64, client_h: f64) -> Point2 {
        let scale = (client_w / self.w).min(client_h / self.h);
        if !scale.is_finite() || scale <= 0.0 {
            return Point2::new(self.x + screen.x, self.y + screen.y);
        }
        Point2::new(self.x + screen.x / scale, self.y + screen.y / scale)
    }

    /// Box translated so content follows a pointer that moved by
    /// `(dx, dy)` screen pixels since `self` was recorded.
    pub fn panned(&self, dx: f64, dy: f64, client_w: f64, client_h: f64) -> Self {
        let sx = self.w / client_w.max(1.0);
        let sy = self.h / client_h.max(1.0);
        Self {
            x: self.x - dx * sx,
            y: self.y - dy * sy,
            ..*self
        }
    }

    /// Box zoomed by a wheel delta, keeping `focus` fixed on screen.
    ///
    /// The scale factor is `exp(-delta * 0.001)`; width is clamped and the
    /// aspect ratio kept.
    pub fn zoomed(&self, focus: Point2, delta: f64) -> Self {
        let scale = (-delta * ZOOM_RATE).exp();
        let w = (self.w * scale).clamp(MIN_VIEW_WIDTH, MAX_VIEW_WIDTH);
        let h = w * (self.h / self.w);
        Self {
            x: focus.x - (focus.x - self.x) * (w / self.w),
            y: focus.y - (focus.y - self.y) * (h / self.h),
            w,
            h,
        }
    }
}
