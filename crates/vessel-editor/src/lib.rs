#![warn(missing_docs)]

//! Interactive Bezier editor model for drawing vessel profiles.
//!
//! The editor keeps a list of [`Anchor`]s with optional control handles and
//! turns pointer and key input into edits: placing anchors (click-drag for
//! a smooth join), dragging anchors and handles, exact segment splitting,
//! smoothing, curve/line conversion, deletion and bounded undo/redo. The
//! result is written out as path data that the profile import pipeline
//! reads like any imported drawing.
//!
//! # Example
//!
//! ```
//! use vessel_editor::{CurveEditor, Modifiers, PointerButton};
//! use vessel_kernel_math::Point2;
//!
//! let mut editor = CurveEditor::default();
//! for (x, y) in [(40.0, 0.0), (60.0, 80.0), (30.0, 160.0)] {
//!     editor.pointer_down(Point2::new(x, y), PointerButton::Primary, Modifiers::NONE);
//!     editor.pointer_up();
//! }
//! assert_eq!(editor.to_path_data(), "M40,0 L60,80 L30,160");
//!
//! editor.undo();
//! assert_eq!(editor.anchors().len(), 2);
//! ```

pub mod anchor;
pub mod bezier;
pub mod history;
pub mod model;
pub mod ops;
pub mod serialize;
pub mod view;

pub use anchor::{Anchor, Handle};
pub use bezier::{project_on_line, CubicSegment, Projection};
pub use history::{UndoState, DEFAULT_UNDO_CAPACITY};
pub use model::{
    CurveEditor, EditorSettings, Gesture, HitTarget, Key, Modifiers, PointerButton,
    MIN_APPLY_ANCHORS,
};
pub use ops::{
    compute_mirrored_join, convert_to_curve, convert_to_line, find_nearest_segment, smooth_anchor,
    split_segment, Segment, SegmentHit, SMOOTH_FACTOR,
};
pub use serialize::to_path_data;
pub use view::{ViewBox, MAX_VIEW_WIDTH, MIN_VIEW_WIDTH};
