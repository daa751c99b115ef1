//! Screen model: cells, cursor, grids, scrollback

pub mod cell;
pub mod cursor;
pub mod history;
pub mod screen;

pub use cell::{AttrFlags, Cell, Color};
pub use cursor::CursorPosition;
pub use history::History;
pub use screen::{ActiveBuffer, Screen, ScreenEvent};
