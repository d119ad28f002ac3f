//! The curve editor: anchor list, selection, pointer gestures and history.
//!
//! The host forwards raw input (pointer positions in screen pixels,
//! buttons, modifiers, keys and wheel deltas). The editor maps screen
//! positions into canvas units through its [`ViewBox`] and mutates the
//! anchor list. Every mutation records one undo step first, so a whole
//! drag is undone at once.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vessel_kernel_math::Point2;

use crate::anchor::{Anchor, Handle};
use crate::history::UndoState;
use crate::ops::{self, SMOOTH_FACTOR};
use crate::serialize::to_path_data;
use crate::view::ViewBox;

/// Minimum anchors needed for a usable profile.
pub const MIN_APPLY_ANCHORS: usize = 2;

/// User-tunable editor behaviour. Distances are in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Keep anchors at x >= 0 while placing and dragging.
    pub lock_right: bool,
    /// Show the profile mirrored about the axis. Display only.
    pub mirror_preview: bool,
    /// Drag distance after which a placement turns into a curve.
    pub drag_threshold: f64,
    /// Pick radius of anchors.
    pub anchor_hit_radius: f64,
    /// Pick radius of handles.
    pub handle_hit_radius: f64,
    /// Maximum distance from a segment for an insert click.
    pub segment_hit_tolerance: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            lock_right: true,
            mirror_preview: true,
            drag_threshold: 1.5,
            anchor_hit_radius: 5.0,
            handle_hit_radius: 4.0,
            segment_hit_tolerance: 10.0,
        }
    }
}

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button or touch.
    Primary,
    /// Wheel button.
    Middle,
    /// Right button.
    Secondary,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Alt / Option.
    pub alt: bool,
    /// Control.
    pub ctrl: bool,
    /// Meta / Command.
    pub meta: bool,
    /// Shift.
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        meta: false,
        shift: false,
    };

    /// Only Alt held.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Ctrl or Meta held.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Space bar; held to pan.
    Space,
    /// Delete.
    Delete,
    /// Backspace.
    Backspace,
    /// Any other character key.
    Char(char),
}

/// What a pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// An anchor point.
    Anchor(usize),
    /// A control handle of an anchor.
    Handle(usize, Handle),
}

/// The gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// No button held.
    Idle,
    /// A freshly placed anchor whose incoming handle follows the pointer.
    Placing {
        /// Index of the placed anchor.
        index: usize,
    },
    /// Moving an anchor.
    DraggingAnchor {
        /// Anchor index.
        index: usize,
    },
    /// Moving one handle.
    DraggingHandle {
        /// Anchor index.
        index: usize,
        /// Which handle.
        handle: Handle,
    },
    /// Moving the view.
    Panning {
        /// Pointer position at the start, in screen pixels.
        start_screen: Point2,
        /// View box at the start.
        origin: ViewBox,
    },
}

/// Interactive Bezier profile editor.
#[derive(Debug, Clone)]
pub struct CurveEditor {
    /// Behaviour switches and pick radii.
    pub settings: EditorSettings,
    anchors: Vec<Anchor>,
    selected: Option<usize>,
    history: UndoState<Vec<Anchor>>,
    gesture: Gesture,
    view: ViewBox,
    client_w: f64,
    client_h: f64,
    space_held: bool,
}

impl Default for CurveEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl CurveEditor {
    /// An empty editor.
    pub fn new(settings: EditorSettings) -> Self {
        let view = ViewBox::default();
        Self {
            settings,
            anchors: Vec::new(),
            selected: None,
            history: UndoState::new(),
            gesture: Gesture::Idle,
            client_w: view.w,
            client_h: view.h,
            view,
            space_held: false,
        }
    }

    /// An editor preloaded with anchors and no history.
    pub fn from_anchors(anchors: Vec<Anchor>, settings: EditorSettings) -> Self {
        Self {
            anchors,
            ..Self::new(settings)
        }
    }

    /// Current anchors.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Selected anchor index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select an anchor; out-of-range indices clear the selection.
    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.anchors.len());
    }

    /// Gesture in progress.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Visible canvas window.
    pub fn view_box(&self) -> ViewBox {
        self.view
    }

    /// Size of the host drawing surface in screen pixels.
    pub fn set_client_size(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.client_w = width;
            self.client_h = height;
        }
    }

    /// Restore the default view.
    pub fn reset_view(&mut self) {
        self.view = ViewBox::default();
    }

    /// Whether Space is held.
    pub fn space_held(&self) -> bool {
        self.space_held
    }

    /// Map a screen position to canvas coordinates.
    pub fn to_canvas(&self, screen: Point2) -> Point2 {
        self.view
            .screen_to_canvas(screen, self.client_w, self.client_h)
    }

    /// The topmost anchor or handle under `p` (canvas coordinates).
    ///
    /// Later anchors are on top. Within an anchor, the point wins over its
    /// outgoing handle, which wins over its incoming handle.
    pub fn hit_test(&self, p: Point2) -> Option<HitTarget> {
        let within = |q: Point2, r: f64| (q - p).norm() <= r;
        self.anchors.iter().enumerate().rev().find_map(|(i, a)| {
            if within(a.point(), self.settings.anchor_hit_radius) {
                return Some(HitTarget::Anchor(i));
            }
            [Handle::C2, Handle::C1].into_iter().find_map(|h| {
                a.handle(h)
                    .filter(|&c| within(c, self.settings.handle_hit_radius))
                    .map(|_| HitTarget::Handle(i, h))
            })
        })
    }

    /// Start a gesture.
    pub fn pointer_down(&mut self, screen: Point2, button: PointerButton, mods: Modifiers) {
        if !(screen.x.is_finite() && screen.y.is_finite()) {
            return;
        }

        if button == PointerButton::Middle || (button == PointerButton::Primary && self.space_held)
        {
            self.gesture = Gesture::Panning {
                start_screen: screen,
                origin: self.view,
            };
            return;
        }
        if button != PointerButton::Primary {
            return;
        }

        let p = self.to_canvas(screen);

        if let Some(target) = self.hit_test(p) {
            self.record();
            self.gesture = match target {
                HitTarget::Anchor(index) => {
                    self.selected = Some(index);
                    Gesture::DraggingAnchor { index }
                }
                HitTarget::Handle(index, handle) => Gesture::DraggingHandle { index, handle },
            };
            return;
        }

        if mods.alt && self.anchors.len() >= MIN_APPLY_ANCHORS {
            if let Some(hit) = ops::find_nearest_segment(&self.anchors, &p) {
                if hit.distance < self.settings.segment_hit_tolerance {
                    self.split_segment(hit.index, hit.t);
                    return;
                }
            }
        }

        self.record();
        let x = self.clamp_x(p.x);
        self.anchors.push(Anchor::new(x, p.y));
        let index = self.anchors.len() - 1;
        self.selected = Some(index);
        self.gesture = Gesture::Placing { index };
    }

    /// Continue the current gesture. Each call works from the live anchor
    /// list, so any number of moves may arrive between down and up.
    pub fn pointer_move(&mut self, screen: Point2) {
        if !(screen.x.is_finite() && screen.y.is_finite()) {
            return;
        }
        let p = self.to_canvas(screen);

        match self.gesture {
            Gesture::Idle => {}
            Gesture::Panning {
                start_screen,
                origin,
            } => {
                let d = screen - start_screen;
                self.view = origin.panned(d.x, d.y, self.client_w, self.client_h);
            }
            Gesture::Placing { index } => {
                let Some(curr) = self.anchors.get(index).copied() else {
                    return;
                };
                let drag = p - curr.point();
                if drag.norm() <= self.settings.drag_threshold {
                    return;
                }
                let prev = index.checked_sub(1).and_then(|i| self.anchors.get(i));
                let (prev, curr) = ops::compute_mirrored_join(prev, &curr, drag);
                self.anchors[index] = curr;
                if let Some(prev) = prev {
                    self.anchors[index - 1] = prev;
                }
            }
            Gesture::DraggingAnchor { index } => {
                let x = self.clamp_x(p.x);
                if let Some(a) = self.anchors.get_mut(index) {
                    a.set_point(Point2::new(x, p.y));
                }
            }
            Gesture::DraggingHandle { index, handle } => {
                if let Some(a) = self.anchors.get_mut(index) {
                    a.set_handle(handle, Some(p));
                }
            }
        }
    }

    /// End the current gesture.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Zoom about the pointer. Positive deltas zoom in.
    pub fn wheel(&mut self, screen: Point2, delta: f64) {
        if !(screen.x.is_finite() && screen.y.is_finite() && delta.is_finite()) {
            return;
        }
        let focus = self.to_canvas(screen);
        self.view = self.view.zoomed(focus, delta);
    }

    /// Handle a key press. Returns whether the key did anything.
    ///
    /// Ctrl/Cmd+Z undoes, with Shift it redoes. Delete and Backspace remove
    /// the selected anchor. Space starts pan mode until released.
    pub fn key_down(&mut self, key: Key, mods: Modifiers) -> bool {
        match key {
            Key::Space => {
                self.space_held = true;
                true
            }
            Key::Delete | Key::Backspace => self.delete_selected(),
            Key::Char(c) if mods.command() && c.eq_ignore_ascii_case(&'z') => {
                if mods.shift {
                    self.redo()
                } else {
                    self.undo()
                }
            }
            Key::Char(_) => false,
        }
    }

    /// Handle a key release.
    pub fn key_up(&mut self, key: Key) {
        if key == Key::Space {
            self.space_held = false;
        }
    }

    /// Split the segment starting at `index` at parameter `t`.
    pub fn split_segment(&mut self, index: usize, t: f64) -> bool {
        let Some(next) = ops::split_segment(&self.anchors, index, t) else {
            return false;
        };
        self.commit(next);
        debug!(index, t, anchors = self.anchors.len(), "split segment");
        true
    }

    /// Split the segment nearest to `p` (canvas coordinates) if it lies
    /// within the segment hit tolerance.
    pub fn insert_at_point(&mut self, p: Point2) -> bool {
        match ops::find_nearest_segment(&self.anchors, &p) {
            Some(hit) if hit.distance < self.settings.segment_hit_tolerance => {
                self.split_segment(hit.index, hit.t)
            }
            _ => false,
        }
    }

    /// Give the selected anchor handles tangent to its neighbours' chord.
    /// Needs an anchor on both sides.
    pub fn smooth_selected(&mut self) -> bool {
        self.smooth_selected_with(SMOOTH_FACTOR)
    }

    /// [`smooth_selected`](Self::smooth_selected) with a custom handle
    /// length factor.
    pub fn smooth_selected_with(&mut self, k: f64) -> bool {
        let Some(i) = self.selected.filter(|&i| i > 0 && i + 1 < self.anchors.len()) else {
            return false;
        };
        let smoothed = ops::smooth_anchor(&self.anchors[i - 1], &self.anchors[i], &self.anchors[i + 1], k);
        let mut next = self.anchors.clone();
        next[i] = smoothed;
        self.commit(next);
        true
    }

    /// Turn both segments around the selected anchor into curves.
    pub fn convert_selected_to_curve(&mut self) -> bool {
        let Some(next) = self
            .selected
            .and_then(|i| ops::convert_to_curve(&self.anchors, i))
        else {
            return false;
        };
        self.commit(next);
        true
    }

    /// Turn both segments around the selected anchor into straight lines.
    pub fn convert_selected_to_line(&mut self) -> bool {
        let Some(next) = self
            .selected
            .and_then(|i| ops::convert_to_line(&self.anchors, i))
        else {
            return false;
        };
        self.commit(next);
        true
    }

    /// Remove the selected anchor. Neighbours keep their handles.
    pub fn delete_selected(&mut self) -> bool {
        let Some(i) = self.selected.filter(|&i| i < self.anchors.len()) else {
            return false;
        };
        let mut next = self.anchors.clone();
        next.remove(i);
        self.commit(next);
        self.selected = None;
        true
    }

    /// Remove every anchor. Undoable.
    pub fn clear(&mut self) -> bool {
        if self.anchors.is_empty() {
            return false;
        }
        self.commit(Vec::new());
        self.selected = None;
        true
    }

    /// Restore the previous anchor list.
    pub fn undo(&mut self) -> bool {
        let current = self.anchors.clone();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.anchors = previous;
        self.after_restore();
        debug!(anchors = self.anchors.len(), "undo");
        true
    }

    /// Re-apply an undone change.
    pub fn redo(&mut self) -> bool {
        let current = self.anchors.clone();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.anchors = next;
        self.after_restore();
        debug!(anchors = self.anchors.len(), "redo");
        true
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Path data for the current anchors.
    pub fn to_path_data(&self) -> String {
        to_path_data(&self.anchors)
    }

    /// The anchors reflected about the axis, for the mirrored display.
    /// Empty when the preview is switched off.
    pub fn mirrored_preview(&self) -> Vec<Anchor> {
        if !self.settings.mirror_preview {
            return Vec::new();
        }
        self.anchors.iter().map(Anchor::mirrored_x).collect()
    }

    /// Whether there are enough anchors to apply the drawing.
    pub fn can_apply(&self) -> bool {
        self.anchors.len() >= MIN_APPLY_ANCHORS
    }

    fn clamp_x(&self, x: f64) -> f64 {
        if self.settings.lock_right {
            x.max(0.0)
        } else {
            x
        }
    }

    fn record(&mut self) {
        self.history.push(self.anchors.clone());
    }

    fn commit(&mut self, next: Vec<Anchor>) {
        self.record();
        self.anchors = next;
    }

    fn after_restore(&mut self) {
        self.gesture = Gesture::Idle;
        if self.selected.is_some_and(|i| i >= self.anchors.len()) {
            self.selected = None;
        }
    }
}
