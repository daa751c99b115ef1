//! Semantic events produced by the parser
//!
//! One event per recognized control function. Coordinates arriving in
//! escape sequences are 1-based on the wire; the parser converts them to
//! 0-based before emitting, so consumers never see wire numbering.

use serde::{Deserialize, Serialize};

use crate::core::{AttrFlags, Color};

/// A parsed terminal action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalEvent {
    /// A run of printable text, charset mapping already applied
    Text(String),

    // Control characters
    Bell,
    Backspace,
    LineFeed,
    FormFeed,
    CarriageReturn,

    // Cursor movement (counts already defaulted to 1)
    CursorUp(u16),
    CursorDown(u16),
    CursorForward(u16),
    CursorBackward(u16),
    CursorNextLine(u16),
    CursorPreviousLine(u16),
    /// CHA, 0-based column
    CursorColumn(u16),
    /// CUP/HVP, 0-based
    CursorPosition {
        row: u16,
        col: u16,
    },
    SaveCursor,
    RestoreCursor,

    // Erasing
    ClearScreen,
    ClearScreenFromCursor,
    ClearScreenToCursor,
    ClearLine,
    ClearLineFromCursor,
    ClearLineToCursor,

    // Editing
    InsertLines(u16),
    DeleteLines(u16),
    InsertChars(u16),
    DeleteChars(u16),
    EraseChars(u16),

    // Scrolling
    ScrollUp(u16),
    ScrollDown(u16),
    /// DECSTBM, 0-based; `bottom` is `None` when defaulted to the last row
    SetScrollRegion {
        top: u16,
        bottom: Option<u16>,
    },

    // SGR: the parser accumulates and emits the full resulting state
    SetAttributes {
        fg: Color,
        bg: Color,
        attrs: AttrFlags,
    },

    // Tabs
    TabForward(u16),
    TabBackward(u16),
    SetTabStop,
    ClearTabStop,
    ClearAllTabStops,

    // Modes
    SetMode {
        mode: u16,
        enable: bool,
    },
    SetPrivateMode {
        mode: u16,
        enable: bool,
    },
    UseAlternateBuffer(bool),
    SetCursorVisible(bool),
    KeypadApplicationMode(bool),

    // Escape-level commands
    Index,
    ReverseIndex,
    NextLine,
    FullReset,

    // Requests the screen cannot answer itself
    DeviceStatusReport,
    CursorPositionReport,

    // Uninterpreted string payloads, surfaced as hooks
    OscPayload(String),
    DcsPayload(String),
}
