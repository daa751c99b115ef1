//! Bounded scrollback history
//!
//! Rows scrolled off the top of the main buffer are archived here. The
//! storage is a fixed-capacity ring buffer; when full, the oldest row is
//! dropped to make room.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Default maximum number of archived rows
pub const DEFAULT_MAX_HISTORY: usize = 1000;

/// Ring buffer of rows scrolled out of the visible grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    lines: Vec<Vec<Cell>>,
    /// Index of the oldest line
    head: usize,
    len: usize,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vec::new(),
            head: 0,
            len: 0,
            capacity,
        }
    }

    /// Number of archived rows
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Archive a row. Drops the oldest row when at capacity.
    pub fn push(&mut self, line: Vec<Cell>) {
        if self.capacity == 0 {
            return;
        }
        if self.len < self.capacity {
            self.lines.push(line);
            self.len += 1;
        } else {
            self.lines[self.head] = line;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Get an archived row. Index 0 is the oldest.
    pub fn get(&self, index: usize) -> Option<&[Cell]> {
        if index >= self.len {
            return None;
        }
        let pos = (self.head + index) % self.len.max(1);
        self.lines.get(pos).map(|l| l.as_slice())
    }

    /// Iterate rows from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &[Cell]> {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Change the capacity, keeping the newest rows when shrinking
    pub fn set_capacity(&mut self, capacity: usize) {
        let keep = self.len.min(capacity);
        let mut kept: Vec<Vec<Cell>> = (self.len - keep..self.len)
            .filter_map(|i| self.get(i).map(|l| l.to_vec()))
            .collect();
        self.lines.clear();
        self.lines.append(&mut kept);
        self.head = 0;
        self.len = self.lines.len();
        self.capacity = capacity;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.head = 0;
        self.len = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}
