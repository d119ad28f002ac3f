//! Anchors and their control handles.

use serde::{Deserialize, Serialize};
use vessel_kernel_math::Point2;

/// Which control handle of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// Incoming handle, shaping the segment from the previous anchor.
    C1,
    /// Outgoing handle, shaping the segment to the next anchor.
    C2,
}

/// A user-placed vertex with optional Bezier control handles.
///
/// Handles are absolute positions. A segment with no handle on either side
/// is a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Radial coordinate.
    pub x: f64,
    /// Height coordinate.
    pub y: f64,
    /// Incoming control handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c1: Option<Point2>,
    /// Outgoing control handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c2: Option<Point2>,
}

impl Anchor {
    /// A corner anchor with no handles.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            c1: None,
            c2: None,
        }
    }

    /// A corner anchor at `p`.
    pub fn at(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }

    /// Builder: set the incoming handle.
    pub fn with_c1(mut self, c1: Point2) -> Self {
        self.c1 = Some(c1);
        self
    }

    /// Builder: set the outgoing handle.
    pub fn with_c2(mut self, c2: Point2) -> Self {
        self.c2 = Some(c2);
        self
    }

    /// Anchor position.
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Move the anchor, leaving its handles where they are.
    pub fn set_point(&mut self, p: Point2) {
        self.x = p.x;
        self.y = p.y;
    }

    /// The given handle, if present.
    pub fn handle(&self, which: Handle) -> Option<Point2> {
        match which {
            Handle::C1 => self.c1,
            Handle::C2 => self.c2,
        }
    }

    /// Set or clear the given handle.
    pub fn set_handle(&mut self, which: Handle, p: Option<Point2>) {
        match which {
            Handle::C1 => self.c1 = p,
            Handle::C2 => self.c2 = p,
        }
    }

    /// Drop both handles.
    pub fn clear_handles(&mut self) {
        self.c1 = None;
        self.c2 = None;
    }

    /// The same anchor with every x coordinate negated.
    pub fn mirrored_x(&self) -> Self {
        let flip = |p: Point2| Point2::new(-p.x, p.y);
        Self {
            x: -self.x,
            y: self.y,
            c1: self.c1.map(flip),
            c2: self.c2.map(flip),
        }
    }
}
