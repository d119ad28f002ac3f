//! Property-based tests for path interpretation.
//!
//! Run with: cargo test -p vessel-path -- proptest

use proptest::prelude::*;
use vessel_kernel_math::Point2;
use vessel_path::sample::{cubic_point, quadratic_point, sample_cubic, sample_quadratic};
use vessel_path::{interpret, PipelineConfig};

// =============================================================================
// Strategies
// =============================================================================

/// A line-only command with its operands.
#[derive(Debug, Clone)]
enum LineCmd {
    L(bool, f64, f64),
    H(bool, f64),
    V(bool, f64),
}

fn arb_coord() -> impl Strategy<Value = f64> {
    (-1000i32..1000).prop_map(|v| v as f64 / 4.0)
}

fn arb_point() -> impl Strategy<Value = Point2> {
    (-100.0..100.0f64, -100.0..100.0f64).prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_line_cmd() -> impl Strategy<Value = LineCmd> {
    prop_oneof![
        (any::<bool>(), arb_coord(), arb_coord()).prop_map(|(a, x, y)| LineCmd::L(a, x, y)),
        (any::<bool>(), arb_coord()).prop_map(|(a, x)| LineCmd::H(a, x)),
        (any::<bool>(), arb_coord()).prop_map(|(a, y)| LineCmd::V(a, y)),
    ]
}

/// Render commands as path data and compute the expected vertices directly.
fn render(start: (f64, f64), cmds: &[LineCmd]) -> (String, Vec<Point2>) {
    let mut d = format!("M{},{}", start.0, start.1);
    let (mut x, mut y) = start;
    let mut expected = vec![Point2::new(x, y)];
    for cmd in cmds {
        match *cmd {
            LineCmd::L(abs, dx, dy) => {
                d.push_str(&format!(" {}{},{}", if abs { 'L' } else { 'l' }, dx, dy));
                if abs {
                    x = dx;
                    y = dy;
                } else {
                    x += dx;
                    y += dy;
                }
            }
            LineCmd::H(abs, v) => {
                d.push_str(&format!(" {}{}", if abs { 'H' } else { 'h' }, v));
                x = if abs { v } else { x + v };
            }
            LineCmd::V(abs, v) => {
                d.push_str(&format!(" {}{}", if abs { 'V' } else { 'v' }, v));
                y = if abs { v } else { y + v };
            }
        }
        expected.push(Point2::new(x, y));
    }
    (d, expected)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_line_commands_match_direct_evaluation(
        start in (arb_coord(), arb_coord()),
        cmds in prop::collection::vec(arb_line_cmd(), 0..30),
    ) {
        let (d, expected) = render(start, &cmds);
        let result = interpret(&d, &PipelineConfig::default());
        prop_assert!(!result.truncated);
        prop_assert_eq!(result.vertices, expected);
    }

    #[test]
    fn proptest_bezier_endpoints(
        p0 in arb_point(),
        p1 in arb_point(),
        p2 in arb_point(),
        p3 in arb_point(),
        n in 1usize..50,
    ) {
        prop_assert!((quadratic_point(&p0, &p1, &p2, 0.0) - p0).norm() < 1e-9);
        prop_assert!((quadratic_point(&p0, &p1, &p2, 1.0) - p2).norm() < 1e-9);
        prop_assert!((cubic_point(&p0, &p1, &p2, &p3, 0.0) - p0).norm() < 1e-9);
        prop_assert!((cubic_point(&p0, &p1, &p2, &p3, 1.0) - p3).norm() < 1e-9);

        let q = sample_quadratic(&p0, &p1, &p2, n);
        let c = sample_cubic(&p0, &p1, &p2, &p3, n);
        prop_assert_eq!(q.len(), n);
        prop_assert!((q[n - 1] - p2).norm() < 1e-9);
        prop_assert!((c[n - 1] - p3).norm() < 1e-9);
    }

    #[test]
    fn proptest_smooth_cubic_reflects_previous_control(
        c1 in (arb_coord(), arb_coord()),
        c2 in (arb_coord(), arb_coord()),
        mid in (arb_coord(), arb_coord()),
        s2 in (arb_coord(), arb_coord()),
        end in (arb_coord(), arb_coord()),
    ) {
        let smooth = format!(
            "M0,0 C{},{} {},{} {},{} S{},{} {},{}",
            c1.0, c1.1, c2.0, c2.1, mid.0, mid.1, s2.0, s2.1, end.0, end.1
        );
        let reflected = (2.0 * mid.0 - c2.0, 2.0 * mid.1 - c2.1);
        let explicit = format!(
            "M0,0 C{},{} {},{} {},{} C{},{} {},{} {},{}",
            c1.0, c1.1, c2.0, c2.1, mid.0, mid.1,
            reflected.0, reflected.1, s2.0, s2.1, end.0, end.1
        );
        let config = PipelineConfig::drawn();
        prop_assert_eq!(interpret(&smooth, &config).vertices, interpret(&explicit, &config).vertices);
    }

    #[test]
    fn proptest_interpreter_never_panics(d in "[MLHVQTCSAZmlhvqtcsaz0-9., eE+-]{0,80}") {
        let result = interpret(&d, &PipelineConfig::safe());
        prop_assert!(result.vertices.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}
