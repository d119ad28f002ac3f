//! Pure operations on anchor lists.
//!
//! These take anchors by reference and return new values; the editor model
//! decides when to call them and records history around them.

use vessel_kernel_math::{lerp, Point2, Vec2};

use crate::anchor::Anchor;
use crate::bezier::{project_on_line, CubicSegment, Projection};

/// Default handle length as a fraction of the neighbour chord when smoothing.
pub const SMOOTH_FACTOR: f64 = 0.3;

/// Geometry of the segment between two consecutive anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// No handles on either side.
    Line(Point2, Point2),
    /// At least one handle. A missing handle sits on its own anchor.
    Cubic(CubicSegment),
}

impl Segment {
    /// Segment from anchor `a` to anchor `b`.
    pub fn between(a: &Anchor, b: &Anchor) -> Self {
        if a.c2.is_none() && b.c1.is_none() {
            return Segment::Line(a.point(), b.point());
        }
        Segment::Cubic(CubicSegment::new(
            a.point(),
            a.c2.unwrap_or_else(|| a.point()),
            b.c1.unwrap_or_else(|| b.point()),
            b.point(),
        ))
    }

    /// Nearest point on the segment to `p`.
    pub fn project(&self, p: &Point2) -> Projection {
        match self {
            Segment::Line(a, b) => project_on_line(a, b, p),
            Segment::Cubic(c) => c.project(p),
        }
    }

    /// Point at parameter `t`.
    pub fn eval(&self, t: f64) -> Point2 {
        match self {
            Segment::Line(a, b) => lerp(a, b, t),
            Segment::Cubic(c) => c.eval(t),
        }
    }
}

/// The segment nearest to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Index of the segment's first anchor.
    pub index: usize,
    /// Parameter of the nearest point.
    pub t: f64,
    /// Nearest point.
    pub point: Point2,
    /// Distance from the query point.
    pub distance: f64,
}

/// Find the segment closest to `p`. `None` with fewer than two anchors.
pub fn find_nearest_segment(anchors: &[Anchor], p: &Point2) -> Option<SegmentHit> {
    anchors
        .windows(2)
        .enumerate()
        .map(|(index, w)| {
            let proj = Segment::between(&w[0], &w[1]).project(p);
            SegmentHit {
                index,
                t: proj.t,
                point: proj.point,
                distance: proj.distance,
            }
        })
        .fold(None, |best: Option<SegmentHit>, hit| match best {
            Some(b) if b.distance <= hit.distance => Some(b),
            _ => Some(hit),
        })
}

/// Split the segment starting at `index` at parameter `t`.
///
/// Curved segments are subdivided with De Casteljau's construction so both
/// halves trace the original curve exactly; the new anchor gets both
/// handles. Straight segments get a corner anchor at the interpolated
/// point. Returns `None` if `index` has no following anchor.
pub fn split_segment(anchors: &[Anchor], index: usize, t: f64) -> Option<Vec<Anchor>> {
    let a = anchors.get(index)?;
    let b = anchors.get(index + 1)?;
    let t = t.clamp(0.0, 1.0);
    let mut out = anchors.to_vec();

    match Segment::between(a, b) {
        Segment::Line(pa, pb) => {
            out.insert(index + 1, Anchor::at(lerp(&pa, &pb, t)));
        }
        Segment::Cubic(curve) => {
            let (left, right) = curve.subdivide(t);
            out[index].c2 = Some(left.p1);
            out[index + 1].c1 = Some(right.p2);
            let mid = Anchor::at(left.p3).with_c1(left.p2).with_c2(right.p1);
            out.insert(index + 1, mid);
        }
    }
    Some(out)
}

/// Apply a placement drag: the drag vector becomes `curr`'s incoming handle
/// and its negation becomes `prev`'s outgoing handle.
pub fn compute_mirrored_join(prev: Option<&Anchor>, curr: &Anchor, drag: Vec2) -> (Option<Anchor>, Anchor) {
    let mut curr = *curr;
    curr.c1 = Some(curr.point() + drag);
    let prev = prev.map(|p| {
        let mut p = *p;
        p.c2 = Some(p.point() - drag);
        p
    });
    (prev, curr)
}

/// Handles for `curr` tangent to the chord from `prev` to `next`, each
/// `k` times the chord length.
pub fn smooth_anchor(prev: &Anchor, curr: &Anchor, next: &Anchor, k: f64) -> Anchor {
    let v = next.point() - prev.point();
    let len = v.norm();
    let len = if len > 0.0 { len } else { 1.0 };
    let u = v / len;
    let d = k * len;
    let mut out = *curr;
    out.c1 = Some(curr.point() - u * d);
    out.c2 = Some(curr.point() + u * d);
    out
}

/// Give both segments around `index` thirds-rule handles.
///
/// Returns `None` if `index` is out of range or has no neighbours.
pub fn convert_to_curve(anchors: &[Anchor], index: usize) -> Option<Vec<Anchor>> {
    let curr = *anchors.get(index)?;
    let prev = index.checked_sub(1).and_then(|i| anchors.get(i)).copied();
    let next = anchors.get(index + 1).copied();
    if prev.is_none() && next.is_none() {
        return None;
    }

    let mut out = anchors.to_vec();
    if let Some(p) = prev {
        let d = curr.point() - p.point();
        out[index - 1].c2 = Some(p.point() + d * (2.0 / 3.0));
        out[index].c1 = Some(p.point() + d * (1.0 / 3.0));
    }
    if let Some(n) = next {
        let d = n.point() - curr.point();
        out[index].c2 = Some(curr.point() + d * (1.0 / 3.0));
        out[index + 1].c1 = Some(curr.point() + d * (2.0 / 3.0));
    }
    Some(out)
}

/// Strip the handles of both segments around `index`.
pub fn convert_to_line(anchors: &[Anchor], index: usize) -> Option<Vec<Anchor>> {
    anchors.get(index)?;
    let mut out = anchors.to_vec();
    if index > 0 {
        out[index - 1].c2 = None;
    }
    out[index].clear_handles();
    if let Some(next) = out.get_mut(index + 1) {
        next.c1 = None;
    }
    Some(out)
}
