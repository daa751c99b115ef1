//! Terminal screen buffer
//!
//! Owns the main and alternate grids, the cursor, the scroll region, tab
//! stops, current insertion attributes and the scrollback history. All
//! mutation goes through the operations here; each one records the
//! `ScreenEvent` notifications a renderer needs before it returns.

use serde::{Deserialize, Serialize};

use super::cell::{AttrFlags, Cell, Color};
use super::cursor::CursorPosition;
use super::history::{History, DEFAULT_MAX_HISTORY};

/// Which grid is live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveBuffer {
    Main,
    Alternate,
}

/// Change notification recorded by screen operations
///
/// Drained by the consumer via [`Screen::take_events`]. Damage rectangles
/// are in cells, `(row, col)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEvent {
    Damage {
        row: u16,
        col: u16,
        rows: u16,
        cols: u16,
    },
    CursorMoved {
        row: u16,
        col: u16,
    },
    CursorVisibility(bool),
    Resized {
        rows: u16,
        cols: u16,
    },
}

/// The terminal screen model
#[derive(Debug, Clone)]
pub struct Screen {
    rows: u16,
    cols: u16,
    main: Vec<Vec<Cell>>,
    alternate: Vec<Vec<Cell>>,
    active: ActiveBuffer,
    cursor: CursorPosition,
    saved_cursor: Option<CursorPosition>,
    cursor_visible: bool,
    /// Current insertion attributes, applied to newly written cells
    fg: Color,
    bg: Color,
    attrs: AttrFlags,
    /// Scroll region, inclusive rows
    scroll_top: u16,
    scroll_bottom: u16,
    tab_stops: Vec<bool>,
    history: History,
    events: Vec<ScreenEvent>,
}

fn blank_grid(rows: u16, cols: u16) -> Vec<Vec<Cell>> {
    vec![vec![Cell::default(); cols as usize]; rows as usize]
}

/// Tab stops every 8 columns, column 0 included
fn default_tab_stops(cols: u16) -> Vec<bool> {
    (0..cols).map(|c| c % 8 == 0).collect()
}

impl Screen {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            main: blank_grid(rows, cols),
            alternate: blank_grid(rows, cols),
            active: ActiveBuffer::Main,
            cursor: CursorPosition::default(),
            saved_cursor: None,
            cursor_visible: true,
            fg: Color::Default,
            bg: Color::Default,
            attrs: AttrFlags::empty(),
            scroll_top: 0,
            scroll_bottom: rows.saturating_sub(1),
            tab_stops: default_tab_stops(cols),
            history: History::new(DEFAULT_MAX_HISTORY),
            events: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn active_buffer(&self) -> ActiveBuffer {
        self.active
    }

    pub fn scroll_region(&self) -> (u16, u16) {
        (self.scroll_top, self.scroll_bottom)
    }

    pub fn attributes(&self) -> (Color, Color, AttrFlags) {
        (self.fg, self.bg, self.attrs)
    }

    pub fn cell(&self, row: u16, col: u16) -> Option<&Cell> {
        self.grid()
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
    }

    /// Text of one visible row, trailing spaces trimmed
    pub fn row_text(&self, row: u16) -> String {
        let line: String = self
            .grid()
            .get(row as usize)
            .map(|r| r.iter().map(|c| c.ch).collect())
            .unwrap_or_default();
        line.trim_end().to_string()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// An archived row, index 0 oldest
    pub fn history_line(&self, index: usize) -> Option<&[Cell]> {
        self.history.get(index)
    }

    pub fn set_max_history(&mut self, capacity: usize) {
        self.history.set_capacity(capacity);
    }

    /// Drain the recorded change notifications, in order
    pub fn take_events(&mut self) -> Vec<ScreenEvent> {
        std::mem::take(&mut self.events)
    }

    fn grid(&self) -> &Vec<Vec<Cell>> {
        match self.active {
            ActiveBuffer::Main => &self.main,
            ActiveBuffer::Alternate => &self.alternate,
        }
    }

    fn grid_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        match self.active {
            ActiveBuffer::Main => &mut self.main,
            ActiveBuffer::Alternate => &mut self.alternate,
        }
    }

    // ------------------------------------------------------------------
    // Event recording

    fn damage(&mut self, row: u16, col: u16, rows: u16, cols: u16) {
        self.events.push(ScreenEvent::Damage {
            row,
            col,
            rows,
            cols,
        });
    }

    fn damage_rows(&mut self, top: u16, bottom: u16) {
        self.damage(top, 0, bottom.saturating_sub(top) + 1, self.cols);
    }

    fn damage_all(&mut self) {
        self.damage(0, 0, self.rows, self.cols);
    }

    fn cursor_moved(&mut self) {
        self.events.push(ScreenEvent::CursorMoved {
            row: self.cursor.row,
            col: self.cursor.col,
        });
    }

    // ------------------------------------------------------------------
    // Cursor

    /// Move to an absolute position, each axis clamped independently
    pub fn set_cursor_position(&mut self, row: u16, col: u16) {
        self.cursor.row = row.min(self.rows.saturating_sub(1));
        self.cursor.col = col.min(self.cols.saturating_sub(1));
        self.cursor_moved();
    }

    /// Move relative to the current position, clamped at the edges
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let row = (self.cursor.row as i32 + d_row).max(0) as u16;
        let col = (self.cursor.col as i32 + d_col).max(0) as u16;
        self.set_cursor_position(row, col);
    }

    pub fn save_cursor(&mut self) {
        self.saved_cursor = Some(self.cursor);
    }

    pub fn restore_cursor(&mut self) {
        if let Some(saved) = self.saved_cursor {
            self.cursor = saved;
            self.cursor.clamp(self.rows, self.cols);
            self.cursor_moved();
        }
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible != visible {
            self.cursor_visible = visible;
            self.events.push(ScreenEvent::CursorVisibility(visible));
        }
    }

    // ------------------------------------------------------------------
    // Writing

    /// Write one character at the cursor and advance
    ///
    /// The cell takes the current insertion attributes. Advancing past the
    /// right edge wraps to column 0 of the next row; wrapping off the bottom
    /// of the scroll region scrolls the region up by one, so output never
    /// runs off the grid.
    pub fn insert_char(&mut self, ch: char) {
        if self.rows == 0 || self.cols == 0 {
            return;
        }
        let cell = Cell::styled(ch, self.fg, self.bg, self.attrs);
        let (row, col) = (self.cursor.row, self.cursor.col);
        self.grid_mut()[row as usize][col as usize] = cell;
        self.damage(row, col, 1, 1);

        self.cursor.col += 1;
        if self.cursor.col >= self.cols {
            self.cursor.col = 0;
            if self.cursor.row >= self.scroll_bottom {
                self.scroll_up(1);
            } else {
                self.cursor.row += 1;
            }
        }
        self.cursor_moved();
    }

    /// Write a run of text, interpreting LF, CR and HT
    ///
    /// Other control characters are dropped. Printables go through
    /// [`Self::insert_char`].
    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => self.line_feed(),
                '\r' => self.carriage_return(),
                '\t' => self.tab_forward(),
                c if (c as u32) < 0x20 || c == '\u{7f}' => {}
                c => self.insert_char(c),
            }
        }
    }

    /// Move down one row, scrolling the region when at its bottom
    pub fn line_feed(&mut self) {
        if self.cursor.row >= self.scroll_bottom {
            self.scroll_up(1);
        } else {
            self.cursor.row += 1;
        }
        self.cursor_moved();
    }

    pub fn carriage_return(&mut self) {
        self.cursor.col = 0;
        self.cursor_moved();
    }

    /// Move up one row, scrolling the region down when at its top
    pub fn reverse_line_feed(&mut self) {
        if self.cursor.row <= self.scroll_top {
            self.scroll_down(1);
        } else {
            self.cursor.row -= 1;
        }
        self.cursor_moved();
    }

    // ------------------------------------------------------------------
    // Erasing

    /// EL: 0 = cursor to end, 1 = start to cursor, 2 = whole line
    pub fn erase_line(&mut self, mode: u16) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let cols = self.cols;
        let range = match mode {
            0 => col..cols,
            1 => 0..col.saturating_add(1).min(cols),
            2 => 0..cols,
            _ => return,
        };
        let (start, len) = (range.start, range.end.saturating_sub(range.start));
        if let Some(line) = self.grid_mut().get_mut(row as usize) {
            for cell in &mut line[range.start as usize..range.end as usize] {
                cell.reset();
            }
        }
        self.damage(row, start, 1, len);
    }

    /// ED: 0 = cursor to end of screen, 1 = start to cursor, 2 = all
    ///
    /// The cursor does not move, in any mode.
    pub fn erase_screen(&mut self, mode: u16) {
        match mode {
            0 => {
                self.erase_line(0);
                for row in self.cursor.row + 1..self.rows {
                    self.blank_row(row);
                }
                let (top, bottom) = (self.cursor.row, self.rows.saturating_sub(1));
                self.damage_rows(top, bottom);
            }
            1 => {
                for row in 0..self.cursor.row {
                    self.blank_row(row);
                }
                self.erase_line(1);
                self.damage_rows(0, self.cursor.row);
            }
            2 => {
                for row in 0..self.rows {
                    self.blank_row(row);
                }
                self.damage_all();
            }
            _ => {}
        }
    }

    fn blank_row(&mut self, row: u16) {
        if let Some(line) = self.grid_mut().get_mut(row as usize) {
            for cell in line.iter_mut() {
                cell.reset();
            }
        }
    }

    /// ECH: blank n cells from the cursor rightward, no shifting
    pub fn erase_chars(&mut self, n: u16) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let end = col.saturating_add(n.max(1)).min(self.cols);
        if let Some(line) = self.grid_mut().get_mut(row as usize) {
            for cell in &mut line[col as usize..end as usize] {
                cell.reset();
            }
        }
        self.damage(row, col, 1, end.saturating_sub(col));
    }

    /// ICH: shift the rest of the row right, dropping cells off the edge
    pub fn insert_chars(&mut self, n: u16) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let n = (n.max(1) as usize).min((self.cols - col.min(self.cols)) as usize);
        if let Some(line) = self.grid_mut().get_mut(row as usize) {
            for _ in 0..n {
                line.insert(col as usize, Cell::default());
                line.pop();
            }
        }
        self.damage(row, col, 1, self.cols - col);
    }

    /// DCH: shift the rest of the row left, blanks entering from the edge
    pub fn delete_chars(&mut self, n: u16) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let n = (n.max(1) as usize).min((self.cols - col.min(self.cols)) as usize);
        if let Some(line) = self.grid_mut().get_mut(row as usize) {
            for _ in 0..n {
                if (col as usize) < line.len() {
                    line.remove(col as usize);
                    line.push(Cell::default());
                }
            }
        }
        self.damage(row, col, 1, self.cols - col);
    }

    // ------------------------------------------------------------------
    // Scrolling and line shifting

    /// Set the scroll region, inclusive rows. Invalid regions are ignored.
    pub fn set_scroll_region(&mut self, top: u16, bottom: u16) {
        if top < bottom && bottom < self.rows {
            self.scroll_top = top;
            self.scroll_bottom = bottom;
        }
    }

    /// Scroll the region up by n rows
    ///
    /// Rows dropped off the top of a full-height region on the main buffer
    /// are archived into history; alternate-buffer content is never
    /// archived.
    pub fn scroll_up(&mut self, n: u16) {
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        if top > bottom || bottom >= self.rows {
            return;
        }
        let n = n.max(1).min(bottom - top + 1);
        let archive = self.active == ActiveBuffer::Main
            && top == 0
            && bottom == self.rows.saturating_sub(1);
        for _ in 0..n {
            let grid = match self.active {
                ActiveBuffer::Main => &mut self.main,
                ActiveBuffer::Alternate => &mut self.alternate,
            };
            let dropped = grid[top as usize].clone();
            grid[top as usize..=bottom as usize].rotate_left(1);
            for cell in grid[bottom as usize].iter_mut() {
                cell.reset();
            }
            if archive {
                self.history.push(dropped);
            }
        }
        self.damage_rows(top, bottom);
    }

    /// Scroll the region down by n rows, blank rows entering at the top
    pub fn scroll_down(&mut self, n: u16) {
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        if top > bottom || bottom >= self.rows {
            return;
        }
        let n = n.max(1).min(bottom - top + 1);
        let grid = self.grid_mut();
        for _ in 0..n {
            grid[top as usize..=bottom as usize].rotate_right(1);
            for cell in grid[top as usize].iter_mut() {
                cell.reset();
            }
        }
        self.damage_rows(top, bottom);
    }

    /// IL: insert blank lines at the cursor, shifting the region down.
    /// No-op when the cursor is outside the scroll region.
    pub fn insert_lines(&mut self, n: u16) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        let bottom = self.scroll_bottom;
        let n = n.max(1).min(bottom - row + 1);
        let grid = self.grid_mut();
        for _ in 0..n {
            grid[row as usize..=bottom as usize].rotate_right(1);
            for cell in grid[row as usize].iter_mut() {
                cell.reset();
            }
        }
        self.damage_rows(row, bottom);
    }

    /// DL: delete lines at the cursor, shifting the region up.
    /// No-op when the cursor is outside the scroll region.
    pub fn delete_lines(&mut self, n: u16) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        let bottom = self.scroll_bottom;
        let n = n.max(1).min(bottom - row + 1);
        let grid = self.grid_mut();
        for _ in 0..n {
            grid[row as usize..=bottom as usize].rotate_left(1);
            for cell in grid[bottom as usize].iter_mut() {
                cell.reset();
            }
        }
        self.damage_rows(row, bottom);
    }

    // ------------------------------------------------------------------
    // Tab stops

    pub fn set_tab_stop(&mut self) {
        let col = self.cursor.col as usize;
        if col < self.tab_stops.len() {
            self.tab_stops[col] = true;
        }
    }

    pub fn clear_tab_stop(&mut self) {
        let col = self.cursor.col as usize;
        if col < self.tab_stops.len() {
            self.tab_stops[col] = false;
        }
    }

    pub fn clear_all_tab_stops(&mut self) {
        for stop in &mut self.tab_stops {
            *stop = false;
        }
    }

    /// Move to the next tab stop, clamping at the last column
    pub fn tab_forward(&mut self) {
        let next = (self.cursor.col + 1..self.cols)
            .find(|&c| self.tab_stops.get(c as usize).copied().unwrap_or(false));
        self.cursor.col = next.unwrap_or(self.cols.saturating_sub(1));
        self.cursor_moved();
    }

    /// Move to the previous tab stop, clamping at column 0
    pub fn tab_backward(&mut self) {
        let prev = (0..self.cursor.col)
            .rev()
            .find(|&c| self.tab_stops.get(c as usize).copied().unwrap_or(false));
        self.cursor.col = prev.unwrap_or(0);
        self.cursor_moved();
    }

    // ------------------------------------------------------------------
    // Attributes

    pub fn set_attributes(&mut self, fg: Color, bg: Color, attrs: AttrFlags) {
        self.fg = fg;
        self.bg = bg;
        self.attrs = attrs;
    }

    pub fn reset_attributes(&mut self) {
        self.fg = Color::Default;
        self.bg = Color::Default;
        self.attrs = AttrFlags::empty();
    }

    // ------------------------------------------------------------------
    // Buffers, resize, reset

    /// Switch between the main and alternate grid
    ///
    /// Entering the alternate buffer clears it; its previous content is
    /// never restored.
    pub fn set_active_buffer(&mut self, alternate: bool) {
        let target = if alternate {
            ActiveBuffer::Alternate
        } else {
            ActiveBuffer::Main
        };
        if self.active == target {
            return;
        }
        if target == ActiveBuffer::Alternate {
            self.alternate = blank_grid(self.rows, self.cols);
        }
        self.active = target;
        self.damage_all();
    }

    /// Resize both grids, preserving the overlapping top-left rectangle
    pub fn resize(&mut self, rows: u16, cols: u16) {
        if rows == 0 || cols == 0 || (rows == self.rows && cols == self.cols) {
            return;
        }
        for grid in [&mut self.main, &mut self.alternate] {
            let mut next = blank_grid(rows, cols);
            for (row, line) in grid.iter().take(rows as usize).enumerate() {
                for (col, cell) in line.iter().take(cols as usize).enumerate() {
                    next[row][col] = *cell;
                }
            }
            *grid = next;
        }
        self.rows = rows;
        self.cols = cols;
        self.cursor.clamp(rows, cols);
        if let Some(saved) = &mut self.saved_cursor {
            saved.clamp(rows, cols);
        }
        self.scroll_top = 0;
        self.scroll_bottom = rows - 1;
        self.tab_stops = default_tab_stops(cols);
        self.events.push(ScreenEvent::Resized { rows, cols });
        self.damage_all();
    }

    /// Full reinitialization, keeping only the dimensions
    pub fn reset(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        let max_history = self.history.capacity();
        *self = Screen::new(rows, cols);
        self.history.set_capacity(max_history);
        self.events.push(ScreenEvent::Resized { rows, cols });
        self.damage_all();
    }
}
