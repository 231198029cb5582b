//! Interactive grid editing with undo/redo.
//!
//! `GridEditor` owns a `GridModel` and its `HistoryStack`. Every intent
//! that should be undoable commits exactly once: count changes, resets and
//! nudges commit immediately, drags commit when the gesture ends. Undo and
//! redo restore snapshots without committing.

use std::fmt;

use serde::Serialize;

use super::{Axis, GridModel, HistoryEntry, HistoryStack};

/// Grid nudge step in percent.
pub const GRID_NUDGE_STEP: f64 = 0.1;

/// Grid nudge step in percent while Shift is held.
pub const GRID_NUDGE_FAST_STEP: f64 = 1.0;

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in image coordinates (y grows downward).
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The axis whose lines this direction moves.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Row,
            Direction::Left | Direction::Right => Axis::Col,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Identifies one grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineRef {
    pub axis: Axis,
    pub index: usize,
}

impl LineRef {
    pub fn new(axis: Axis, index: usize) -> Self {
        Self { axis, index }
    }
}

/// Grid model plus history and gesture state.
#[derive(Debug, Clone)]
pub struct GridEditor {
    model: GridModel,
    history: HistoryStack,
    dragging: Option<LineRef>,
    selected: Option<LineRef>,
}

impl GridEditor {
    /// Start editing `model`; its current state is the first history entry.
    pub fn new(model: GridModel) -> Self {
        let history = HistoryStack::with_initial(model.snapshot());
        Self {
            model,
            history,
            dragging: None,
            selected: None,
        }
    }

    /// Read-only view of the current grid.
    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn snapshot(&self) -> HistoryEntry {
        self.model.snapshot()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn selected(&self) -> Option<LineRef> {
        self.selected
    }

    pub fn dragging(&self) -> Option<LineRef> {
        self.dragging
    }

    /// Select a line for keyboard nudging. Out-of-range lines are ignored.
    pub fn select_line(&mut self, axis: Axis, index: usize) {
        if index < self.model.positions(axis).len() {
            self.selected = Some(LineRef::new(axis, index));
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn set_row_count(&mut self, rows: usize) {
        self.set_count(Axis::Row, rows);
    }

    pub fn set_col_count(&mut self, cols: usize) {
        self.set_count(Axis::Col, cols);
    }

    /// Change one axis's count, regenerating its lines. One history commit.
    pub fn set_count(&mut self, axis: Axis, count: usize) {
        self.model.set_count(axis, count);
        self.fix_selection();
        self.commit();
    }

    /// Begin dragging a line; it also becomes the selected line.
    pub fn begin_drag(&mut self, axis: Axis, index: usize) {
        if index >= self.model.positions(axis).len() {
            return;
        }
        let line = LineRef::new(axis, index);
        self.dragging = Some(line);
        self.selected = Some(line);
    }

    /// Move the dragged line to `percent`. Does not commit.
    ///
    /// The drag keeps writing to the same index even if sorting moved the
    /// original line to a different slot.
    pub fn drag_to(&mut self, percent: f64) -> bool {
        let Some(line) = self.dragging else {
            return false;
        };
        self.model.move_line(line.axis, line.index, percent);
        true
    }

    /// Finish the drag gesture and commit the final position.
    pub fn end_drag(&mut self) {
        if self.dragging.take().is_some() {
            self.commit();
        }
    }

    /// Nudge a line by `delta` percent. Each effective nudge is one commit.
    pub fn nudge_line(&mut self, axis: Axis, index: usize, delta: f64) -> bool {
        let moved = self.model.nudge_line(axis, index, delta);
        if moved {
            self.commit();
        }
        moved
    }

    /// Nudge the selected line with an arrow key.
    ///
    /// Up/down only move row lines and left/right only move column lines.
    pub fn nudge_selected(&mut self, direction: Direction, fast: bool) -> bool {
        let Some(line) = self.selected else {
            return false;
        };
        if direction.axis() != line.axis {
            return false;
        }

        let step = if fast { GRID_NUDGE_FAST_STEP } else { GRID_NUDGE_STEP };
        let (dx, dy) = direction.unit();
        let sign = (dx + dy) as f64;
        self.nudge_line(line.axis, line.index, sign * step)
    }

    /// Regenerate both axes uniformly. One history commit.
    pub fn reset_to_uniform(&mut self) {
        self.model.reset_to_uniform();
        self.commit();
    }

    pub fn set_padding(&mut self, axis: Axis, px: u32) {
        self.model.set_padding(axis, px);
    }

    pub fn set_link_padding(&mut self, linked: bool) {
        self.model.set_link_padding(linked);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the previous snapshot. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        self.dragging = None;
        let Some(entry) = self.history.undo() else {
            return false;
        };
        self.model.restore(entry);
        self.fix_selection();
        true
    }

    /// Restore the next snapshot. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        self.dragging = None;
        let Some(entry) = self.history.redo() else {
            return false;
        };
        self.model.restore(entry);
        self.fix_selection();
        true
    }

    fn commit(&mut self) {
        self.history.push(self.model.snapshot());
    }

    fn fix_selection(&mut self) {
        if let Some(line) = self.selected {
            if line.index >= self.model.positions(line.axis).len() {
                self.selected = None;
            }
        }
    }
}
