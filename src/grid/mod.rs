//! Grid-line model.
//!
//! Row and column lines are stored as percentages of the image extent, from
//! the top/left edge (0.0) to the bottom/right edge (100.0). The model is
//! total: counts, percentages and padding are clamped, never
//! rejected.

mod editor;
mod history;
mod partition;

use std::fmt;

use serde::Serialize;

pub use editor::{Direction, GridEditor, LineRef, GRID_NUDGE_FAST_STEP, GRID_NUDGE_STEP};
pub use history::{HistoryEntry, HistoryStack};
pub use partition::{partition, partition_positions};

/// Smallest and largest row/column count.
pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 20;

/// Largest padding, in pixels, on either axis.
pub const MAX_PADDING: u32 = 50;

/// Closest a nudged line may come to its neighbour, in percent.
pub const NUDGE_BUFFER: f64 = 0.1;

/// Which set of grid lines an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal lines, positioned along the image height.
    Row,
    /// Vertical lines, positioned along the image width.
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "col"),
        }
    }
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Evenly spaced line positions across [0, 100].
///
/// Returns `count + 1` values rounded to two decimals. A count below 1
/// yields just the outer edges.
pub fn generate_uniform_positions(count: usize) -> Vec<f64> {
    if count < 1 {
        return vec![0.0, 100.0];
    }

    let step = 100.0 / count as f64;
    (0..=count).map(|i| round2(i as f64 * step)).collect()
}

/// Row/column line positions plus per-axis padding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    row_positions: Vec<f64>,
    col_positions: Vec<f64>,
    padding_x: u32,
    padding_y: u32,
    link_padding: bool,
}

impl GridModel {
    /// Create a uniform grid. Counts are clamped to [1, 20].
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.clamp(MIN_COUNT, MAX_COUNT);
        let cols = cols.clamp(MIN_COUNT, MAX_COUNT);
        Self {
            rows,
            cols,
            row_positions: generate_uniform_positions(rows),
            col_positions: generate_uniform_positions(cols),
            padding_x: 0,
            padding_y: 0,
            link_padding: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows,
            Axis::Col => self.cols,
        }
    }

    /// Number of cells the grid produces.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn row_positions(&self) -> &[f64] {
        &self.row_positions
    }

    pub fn col_positions(&self) -> &[f64] {
        &self.col_positions
    }

    pub fn positions(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Row => &self.row_positions,
            Axis::Col => &self.col_positions,
        }
    }

    fn positions_mut(&mut self, axis: Axis) -> &mut Vec<f64> {
        match axis {
            Axis::Row => &mut self.row_positions,
            Axis::Col => &mut self.col_positions,
        }
    }

    pub fn padding_x(&self) -> u32 {
        self.padding_x
    }

    pub fn padding_y(&self) -> u32 {
        self.padding_y
    }

    pub fn link_padding(&self) -> bool {
        self.link_padding
    }

    /// Set the line count of one axis and regenerate its lines uniformly.
    ///
    /// The other axis is left untouched.
    pub fn set_count(&mut self, axis: Axis, count: usize) {
        let count = count.clamp(MIN_COUNT, MAX_COUNT);
        match axis {
            Axis::Row => self.rows = count,
            Axis::Col => self.cols = count,
        }
        *self.positions_mut(axis) = generate_uniform_positions(count);
    }

    /// Write a line position and re-sort the axis.
    ///
    /// Lines may cross while dragging; sorting settles them back into
    /// non-decreasing order. An index past the last line is ignored.
    pub fn move_line(&mut self, axis: Axis, index: usize, percent: f64) {
        let positions = self.positions_mut(axis);
        let Some(slot) = positions.get_mut(index) else {
            return;
        };

        *slot = clamp_percent(percent);
        positions.sort_by(|a, b| a.total_cmp(b));
    }

    /// Move one line by `delta` percent without letting it reach a neighbour.
    ///
    /// The line stops `NUDGE_BUFFER` short of the lines on either side, so
    /// the array is never reordered. Returns false if nothing moved.
    pub fn nudge_line(&mut self, axis: Axis, index: usize, delta: f64) -> bool {
        let positions = self.positions_mut(axis);
        let Some(&current) = positions.get(index) else {
            return false;
        };

        let lower = match index {
            0 => 0.0,
            i => positions[i - 1] + NUDGE_BUFFER,
        };
        let upper = match positions.get(index + 1) {
            Some(next) => next - NUDGE_BUFFER,
            None => 100.0,
        };

        // Neighbours already closer than the buffer allows
        if lower > upper {
            return false;
        }

        let target = round2(current + delta).clamp(lower, upper);
        if target == current {
            return false;
        }

        positions[index] = target;
        true
    }

    /// Regenerate both axes uniformly from the current counts.
    pub fn reset_to_uniform(&mut self) {
        self.row_positions = generate_uniform_positions(self.rows);
        self.col_positions = generate_uniform_positions(self.cols);
    }

    /// Set padding for one axis (`Col` is horizontal, `Row` is vertical).
    ///
    /// While padding is linked both axes receive the value.
    pub fn set_padding(&mut self, axis: Axis, px: u32) {
        let px = px.min(MAX_PADDING);
        if self.link_padding {
            self.padding_x = px;
            self.padding_y = px;
            return;
        }
        match axis {
            Axis::Col => self.padding_x = px,
            Axis::Row => self.padding_y = px,
        }
    }

    /// Link or unlink padding. Linking copies the horizontal value to vertical.
    pub fn set_link_padding(&mut self, linked: bool) {
        self.link_padding = linked;
        if linked {
            self.padding_y = self.padding_x;
        }
    }

    /// Replace an axis with explicit positions.
    ///
    /// The positions are clamped and sorted; the count follows the number of
    /// lines. Fewer than two lines resets the axis to its outer edges.
    pub fn set_positions(&mut self, axis: Axis, positions: &[f64]) {
        let mut positions: Vec<f64> = positions.iter().copied().map(clamp_percent).collect();
        positions.sort_by(|a, b| a.total_cmp(b));
        if positions.len() < 2 {
            positions = generate_uniform_positions(1);
        }
        let count = (positions.len() - 1).clamp(MIN_COUNT, MAX_COUNT);
        positions.truncate(count + 1);

        match axis {
            Axis::Row => self.rows = count,
            Axis::Col => self.cols = count,
        }
        *self.positions_mut(axis) = positions;
    }

    /// Snapshot of the line state for undo/redo.
    pub fn snapshot(&self) -> HistoryEntry {
        HistoryEntry {
            rows: self.rows,
            cols: self.cols,
            row_positions: self.row_positions.clone(),
            col_positions: self.col_positions.clone(),
        }
    }

    /// Restore line state from a snapshot. Padding is not part of history.
    pub fn restore(&mut self, entry: &HistoryEntry) {
        self.rows = entry.rows;
        self.cols = entry.cols;
        self.row_positions = entry.row_positions.clone();
        self.col_positions = entry.col_positions.clone();
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}
