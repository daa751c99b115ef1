//! Escape sequence parsing: bytes in, semantic events out

pub mod charset;
pub mod event;
pub mod state;

pub use event::TerminalEvent;
pub use state::Parser;
