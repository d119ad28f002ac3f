//! Bounded snapshot-based undo/redo.

use std::collections::VecDeque;

/// Default number of undo steps kept.
pub const DEFAULT_UNDO_CAPACITY: usize = 100;

/// Undo and redo stacks of owned snapshots.
///
/// Snapshots are values, not references into live state, so later edits
/// can never alter a stored step.
#[derive(Debug, Clone)]
pub struct UndoState<T> {
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    capacity: usize,
}

impl<T> UndoState<T> {
    /// Create with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_UNDO_CAPACITY)
    }

    /// Create keeping at most `capacity` undo steps.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    /// Record the state before a mutation. Clears the redo stack; the
    /// oldest step is dropped once capacity is exceeded.
    pub fn push(&mut self, snapshot: T) {
        self.undo_stack.push_back(snapshot);
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Step back. `current` is kept for redo; returns the state to restore.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward. `current` is kept for undo; returns the state to restore.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        Some(next)
    }

    /// Whether there is a step to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is a step to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps held.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<T> Default for UndoState<T> {
    fn default() -> Self {
        Self::new()
    }
}
