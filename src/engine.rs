//! Engine facade
//!
//! Owns one [`Parser`] and one [`Screen`] and wires them together:
//! `process_data` feeds bytes through the parser and applies every
//! resulting event to the screen. Events the screen cannot act on by
//! itself come back to the caller as [`TransportRequest`]s; the engine
//! never writes reply bytes on its own.

use tracing::debug;

use crate::core::{Screen, ScreenEvent};
use crate::error::EngineError;
use crate::parser::{Parser, TerminalEvent};

/// An action the transport layer must carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportRequest {
    /// BEL was received, ring or flash
    Bell,
    /// DSR 5: the remote side asked for a device status reply
    DeviceStatus,
    /// DSR 6: the remote side asked for a cursor position reply.
    /// Coordinates are 0-based; the wire reply is 1-based.
    CursorPosition { row: u16, col: u16 },
    /// An OSC string arrived (e.g. a window title), uninterpreted
    Osc(String),
    /// A DCS string arrived, uninterpreted
    Dcs(String),
}

/// A parser/screen pair for one byte stream
#[derive(Debug)]
pub struct Engine {
    parser: Parser,
    screen: Screen,
}

impl Engine {
    pub fn new(rows: u16, cols: u16) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            parser: Parser::new(),
            screen: Screen::new(rows, cols),
        })
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Feed received bytes through the parser into the screen
    ///
    /// Returns the transport requests the stream produced, in order.
    /// Change notifications accumulate on the screen and are drained
    /// with [`Engine::take_events`].
    pub fn process_data(&mut self, data: &[u8]) -> Vec<TransportRequest> {
        let mut requests = Vec::new();
        for event in self.parser.process_data(data) {
            self.apply_event(event, &mut requests);
        }
        requests
    }

    /// Drain the screen's pending change notifications
    pub fn take_events(&mut self) -> Vec<ScreenEvent> {
        self.screen.take_events()
    }

    pub fn resize(&mut self, rows: u16, cols: u16) -> Result<(), EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimensions { rows, cols });
        }
        self.screen.resize(rows, cols);
        Ok(())
    }

    /// Reinitialize parser and screen, keeping the dimensions
    pub fn reset(&mut self) {
        self.parser.reset();
        self.screen.reset();
    }

    fn apply_event(&mut self, event: TerminalEvent, requests: &mut Vec<TransportRequest>) {
        let screen = &mut self.screen;
        match event {
            TerminalEvent::Text(text) => {
                for ch in text.chars() {
                    screen.insert_char(ch);
                }
            }
            TerminalEvent::Bell => requests.push(TransportRequest::Bell),
            TerminalEvent::Backspace => screen.move_cursor(0, -1),
            TerminalEvent::LineFeed => screen.line_feed(),
            TerminalEvent::FormFeed => {
                screen.erase_screen(2);
                screen.set_cursor_position(0, 0);
            }
            TerminalEvent::CarriageReturn => screen.carriage_return(),

            TerminalEvent::CursorUp(n) => screen.move_cursor(-(n as i32), 0),
            TerminalEvent::CursorDown(n) => screen.move_cursor(n as i32, 0),
            TerminalEvent::CursorForward(n) => screen.move_cursor(0, n as i32),
            TerminalEvent::CursorBackward(n) => screen.move_cursor(0, -(n as i32)),
            TerminalEvent::CursorNextLine(n) => {
                screen.move_cursor(n as i32, 0);
                screen.carriage_return();
            }
            TerminalEvent::CursorPreviousLine(n) => {
                screen.move_cursor(-(n as i32), 0);
                screen.carriage_return();
            }
            TerminalEvent::CursorColumn(col) => {
                let row = screen.cursor().row;
                screen.set_cursor_position(row, col);
            }
            TerminalEvent::CursorPosition { row, col } => screen.set_cursor_position(row, col),
            TerminalEvent::SaveCursor => screen.save_cursor(),
            TerminalEvent::RestoreCursor => screen.restore_cursor(),

            TerminalEvent::ClearScreen => screen.erase_screen(2),
            TerminalEvent::ClearScreenFromCursor => screen.erase_screen(0),
            TerminalEvent::ClearScreenToCursor => screen.erase_screen(1),
            TerminalEvent::ClearLine => screen.erase_line(2),
            TerminalEvent::ClearLineFromCursor => screen.erase_line(0),
            TerminalEvent::ClearLineToCursor => screen.erase_line(1),

            TerminalEvent::InsertLines(n) => screen.insert_lines(n),
            TerminalEvent::DeleteLines(n) => screen.delete_lines(n),
            TerminalEvent::InsertChars(n) => screen.insert_chars(n),
            TerminalEvent::DeleteChars(n) => screen.delete_chars(n),
            TerminalEvent::EraseChars(n) => screen.erase_chars(n),

            TerminalEvent::ScrollUp(n) => screen.scroll_up(n),
            TerminalEvent::ScrollDown(n) => screen.scroll_down(n),
            TerminalEvent::SetScrollRegion { top, bottom } => {
                let bottom = bottom.unwrap_or_else(|| screen.rows().saturating_sub(1));
                screen.set_scroll_region(top, bottom);
            }

            TerminalEvent::SetAttributes { fg, bg, attrs } => screen.set_attributes(fg, bg, attrs),

            TerminalEvent::TabForward(n) => {
                for _ in 0..n {
                    screen.tab_forward();
                }
            }
            TerminalEvent::TabBackward(n) => {
                for _ in 0..n {
                    screen.tab_backward();
                }
            }
            TerminalEvent::SetTabStop => screen.set_tab_stop(),
            TerminalEvent::ClearTabStop => screen.clear_tab_stop(),
            TerminalEvent::ClearAllTabStops => screen.clear_all_tab_stops(),

            TerminalEvent::SetMode { mode, enable } => {
                debug!(mode, enable, "ignoring ANSI mode");
            }
            TerminalEvent::SetPrivateMode { mode, enable } => {
                debug!(mode, enable, "ignoring DEC private mode");
            }
            TerminalEvent::UseAlternateBuffer(alternate) => screen.set_active_buffer(alternate),
            TerminalEvent::SetCursorVisible(visible) => screen.set_cursor_visible(visible),
            TerminalEvent::KeypadApplicationMode(enable) => {
                debug!(enable, "ignoring keypad application mode");
            }

            TerminalEvent::Index => screen.line_feed(),
            TerminalEvent::ReverseIndex => screen.reverse_line_feed(),
            TerminalEvent::NextLine => {
                screen.line_feed();
                screen.carriage_return();
            }
            TerminalEvent::FullReset => screen.reset(),

            TerminalEvent::DeviceStatusReport => requests.push(TransportRequest::DeviceStatus),
            TerminalEvent::CursorPositionReport => {
                let pos = screen.cursor();
                requests.push(TransportRequest::CursorPosition {
                    row: pos.row,
                    col: pos.col,
                });
            }
            TerminalEvent::OscPayload(payload) => requests.push(TransportRequest::Osc(payload)),
            TerminalEvent::DcsPayload(payload) => requests.push(TransportRequest::Dcs(payload)),
        }
    }
}
