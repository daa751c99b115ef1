//! Cursor position tracking

use serde::{Deserialize, Serialize};

/// A cursor position in the grid, 0-based
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub row: u16,
    pub col: u16,
}

impl CursorPosition {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Clamp both axes into a rows x cols grid
    pub fn clamp(&mut self, rows: u16, cols: u16) {
        if self.row >= rows {
            self.row = rows.saturating_sub(1);
        }
        if self.col >= cols {
            self.col = cols.saturating_sub(1);
        }
    }
}
