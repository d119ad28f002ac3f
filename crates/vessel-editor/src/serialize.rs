//! Anchor list to path data.

use std::fmt::Write;

use vessel_kernel_math::Point2;

use crate::anchor::Anchor;

/// Write anchors as path data: `M` for the first anchor, then `C` for each
/// segment that has a handle on either side and `L` otherwise.
///
/// A missing handle on a curved segment is written as its own anchor point.
/// An empty list gives an empty string.
pub fn to_path_data(anchors: &[Anchor]) -> String {
    let Some(first) = anchors.first() else {
        return String::new();
    };

    let mut out = String::new();
    let _ = write!(out, "M{},{}", first.x, first.y);
    for w in anchors.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        if a.c2.is_none() && b.c1.is_none() {
            let _ = write!(out, " L{},{}", b.x, b.y);
        } else {
            let c1 = a.c2.unwrap_or_else(|| a.point());
            let c2 = b.c1.unwrap_or_else(|| b.point());
            let _ = write!(
                out,
                " C{} {} {}",
                pair(&c1),
                pair(&c2),
                pair(&b.point())
            );
        }
    }
    out
}

fn pair(p: &Point2) -> String {
    format!("{},{}", p.x, p.y)
}
