//! Drawn profiles go through the same import pipeline as imported ones.

use approx::assert_relative_eq;
use vessel_editor::{Anchor, CubicSegment, CurveEditor, EditorSettings, Modifiers, PointerButton};
use vessel_kernel_math::Point2;
use vessel_path::{interpret, PipelineConfig};
use vessel_profile::profile_from_editor_path;

fn draw(editor: &mut CurveEditor, points: &[(f64, f64)]) {
    for &(x, y) in points {
        editor.pointer_down(Point2::new(x, y), PointerButton::Primary, Modifiers::NONE);
        editor.pointer_up();
    }
}

#[test]
fn test_drawn_corners_apply_as_profile() {
    let mut editor = CurveEditor::default();
    // Screen coordinates grow downward: base at the bottom of the canvas.
    draw(
        &mut editor,
        &[(0.0, 500.0), (60.0, 500.0), (80.0, 300.0), (40.0, 100.0)],
    );
    assert!(editor.can_apply());

    let profile = profile_from_editor_path(&editor.to_path_data()).unwrap();
    let points = profile.points();
    assert_eq!(points.len(), 4);
    assert_eq!(points[0], Point2::new(0.0, 0.0));
    assert_eq!(points[1], Point2::new(60.0, 0.0));
    assert_eq!(points[3], Point2::new(40.0, 400.0));
    assert_relative_eq!(profile.max_radius(), 80.0);
    assert_relative_eq!(profile.height(), 400.0);
}

#[test]
fn test_drawn_curve_is_sampled() {
    let mut editor = CurveEditor::default();
    draw(&mut editor, &[(50.0, 400.0)]);
    // Click-drag the second anchor to curve the joining segment.
    editor.pointer_down(Point2::new(100.0, 100.0), PointerButton::Primary, Modifiers::NONE);
    editor.pointer_move(Point2::new(140.0, 150.0));
    editor.pointer_up();
    assert!(editor.to_path_data().contains(" C"));

    let profile = profile_from_editor_path(&editor.to_path_data()).unwrap();
    assert!(profile.len() > 3);
    assert_eq!(profile.first().y, 0.0);
    assert_relative_eq!(profile.height(), 300.0, max_relative = 1e-9);
}

#[test]
fn test_split_does_not_change_applied_shape() {
    let curve = CubicSegment::new(
        Point2::new(40.0, 0.0),
        Point2::new(120.0, 60.0),
        Point2::new(0.0, 140.0),
        Point2::new(30.0, 200.0),
    );
    let anchors = vec![
        Anchor::at(curve.p0).with_c2(curve.p1),
        Anchor::at(curve.p3).with_c1(curve.p2),
    ];
    let mut editor = CurveEditor::from_anchors(anchors, EditorSettings::default());
    let before = profile_from_editor_path(&editor.to_path_data()).unwrap();

    assert!(editor.split_segment(0, 0.5));
    assert_eq!(editor.anchors().len(), 3);

    // Every vertex of the split path still lies on the original curve.
    let raw = interpret(&editor.to_path_data(), &PipelineConfig::drawn());
    for v in &raw.vertices {
        assert!(curve.project(v).distance < 1e-6, "{v:?} left the curve");
    }

    let after = profile_from_editor_path(&editor.to_path_data()).unwrap();
    assert_relative_eq!(before.height(), after.height(), max_relative = 1e-9);
}

#[test]
fn test_single_anchor_cannot_apply() {
    let mut editor = CurveEditor::default();
    draw(&mut editor, &[(10.0, 10.0)]);
    assert!(!editor.can_apply());
    assert!(profile_from_editor_path(&editor.to_path_data()).is_err());
}
