//! Undo/redo history of grid line state.

use serde::Serialize;

/// Immutable snapshot of the grid lines (padding is not recorded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub rows: usize,
    pub cols: usize,
    pub row_positions: Vec<f64>,
    pub col_positions: Vec<f64>,
}

/// Linear history with a cursor.
///
/// Pushing after an undo discards the redo branch. Capacity is unbounded.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a history whose only entry is `initial`.
    pub fn with_initial(initial: HistoryEntry) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Record an entry. Returns false when it equals the current entry.
    pub fn push(&mut self, entry: HistoryEntry) -> bool {
        if self.current() == Some(&entry) {
            return false;
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back one entry. `None` means there is nothing to undo.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. `None` means there is nothing to redo.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
