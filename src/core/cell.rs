//! Terminal cell model
//!
//! A cell is a single character plus its colors and attributes. Erased
//! regions are filled with the default cell (space, default colors, no
//! attributes).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The character in this cell
    pub ch: char,
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Text attributes
    pub attrs: AttrFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Default,
            bg: Color::Default,
            attrs: AttrFlags::empty(),
        }
    }
}

impl Cell {
    /// Create a cell holding a single character with default styling
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            ..Default::default()
        }
    }

    /// Create a cell with explicit styling
    pub fn styled(ch: char, fg: Color, bg: Color, attrs: AttrFlags) -> Self {
        Self { ch, fg, bg, attrs }
    }

    /// Check if this cell is empty (space with default colors and no attributes)
    pub fn is_empty(&self) -> bool {
        self.ch == ' '
            && self.fg == Color::Default
            && self.bg == Color::Default
            && self.attrs.is_empty()
    }

    /// Reset the cell to the default state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Color of a cell's foreground or background
///
/// Only the sixteen standard colors are carried; `Default` resolves to the
/// configured default foreground or background at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color
    Default,
    /// Standard palette entry (0-7 normal, 8-15 bright)
    Indexed(u8),
}

impl Default for Color {
    fn default() -> Self {
        Color::Default
    }
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);

    pub const BRIGHT_BLACK: Color = Color::Indexed(8);
    pub const BRIGHT_RED: Color = Color::Indexed(9);
    pub const BRIGHT_GREEN: Color = Color::Indexed(10);
    pub const BRIGHT_YELLOW: Color = Color::Indexed(11);
    pub const BRIGHT_BLUE: Color = Color::Indexed(12);
    pub const BRIGHT_MAGENTA: Color = Color::Indexed(13);
    pub const BRIGHT_CYAN: Color = Color::Indexed(14);
    pub const BRIGHT_WHITE: Color = Color::Indexed(15);

    /// Create an indexed color. Indices 16-255 fold into the sixteen-entry
    /// palette modulo 16; there is no full 256-color table.
    pub fn indexed(index: u16) -> Self {
        Color::Indexed((index % 16) as u8)
    }

    /// Resolve this color to RGB for rendering
    ///
    /// `is_foreground` selects which default applies when the color is
    /// `Default`: light gray for foreground, black for background.
    pub fn to_rgb(&self, is_foreground: bool) -> (u8, u8, u8) {
        match self {
            Color::Default => {
                if is_foreground {
                    DEFAULT_FOREGROUND
                } else {
                    DEFAULT_BACKGROUND
                }
            }
            Color::Indexed(i) => PALETTE[(*i as usize) % 16],
        }
    }
}

/// Default foreground RGB (light gray)
pub const DEFAULT_FOREGROUND: (u8, u8, u8) = (192, 192, 192);
/// Default background RGB (black)
pub const DEFAULT_BACKGROUND: (u8, u8, u8) = (0, 0, 0);

/// The sixteen fixed palette entries: normal colors 0-7, bright 8-15
const PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),       // Black
    (128, 0, 0),     // Red
    (0, 128, 0),     // Green
    (128, 128, 0),   // Yellow
    (0, 0, 128),     // Blue
    (128, 0, 128),   // Magenta
    (0, 128, 128),   // Cyan
    (192, 192, 192), // White
    (128, 128, 128), // Bright Black (gray)
    (255, 0, 0),     // Bright Red
    (0, 255, 0),     // Bright Green
    (255, 255, 0),   // Bright Yellow
    (0, 0, 255),     // Bright Blue
    (255, 0, 255),   // Bright Magenta
    (0, 255, 255),   // Bright Cyan
    (255, 255, 255), // Bright White
];

bitflags! {
    /// Text attribute flags for a cell
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AttrFlags: u8 {
        const BOLD = 0x01;
        const DIM = 0x02;
        const ITALIC = 0x04;
        const UNDERLINE = 0x08;
        const BLINK = 0x10;
        const REVERSE = 0x20;
        const STRIKETHROUGH = 0x40;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_default_is_empty() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.fg, Color::Default);
        assert_eq!(cell.bg, Color::Default);
    }

    #[test]
    fn test_cell_not_empty_with_styling() {
        // A space with non-default styling is not the empty cell
        let cell = Cell::styled(' ', Color::Default, Color::RED, AttrFlags::empty());
        assert!(!cell.is_empty());

        let cell = Cell::styled(' ', Color::Default, Color::Default, AttrFlags::BOLD);
        assert!(!cell.is_empty());
    }

    #[test]
    fn test_cell_reset() {
        let mut cell = Cell::styled('A', Color::RED, Color::BLUE, AttrFlags::BOLD);
        cell.reset();
        assert!(cell.is_empty());
    }

    #[test]
    fn test_color_index_folding() {
        assert_eq!(Color::indexed(1), Color::RED);
        assert_eq!(Color::indexed(15), Color::BRIGHT_WHITE);
        // 256-color indices fold modulo 16
        assert_eq!(Color::indexed(17), Color::RED);
        assert_eq!(Color::indexed(255), Color::BRIGHT_WHITE);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(Color::BLACK.to_rgb(true), (0, 0, 0));
        assert_eq!(Color::RED.to_rgb(true), (128, 0, 0));
        assert_eq!(Color::BRIGHT_RED.to_rgb(true), (255, 0, 0));
        assert_eq!(Color::Default.to_rgb(true), DEFAULT_FOREGROUND);
        assert_eq!(Color::Default.to_rgb(false), DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_attr_flags_clear() {
        let mut attrs = AttrFlags::BOLD | AttrFlags::DIM | AttrFlags::UNDERLINE;
        attrs &= !(AttrFlags::BOLD | AttrFlags::DIM);
        assert_eq!(attrs, AttrFlags::UNDERLINE);
    }

    #[test]
    fn test_cell_serialization() {
        let cell = Cell::styled('X', Color::GREEN, Color::Default, AttrFlags::ITALIC);
        let json = serde_json::to_string(&cell).unwrap();
        let restored: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(cell, restored);
    }
}
