//! VT100/ANSI escape sequence parser
//!
//! A byte-driven state machine. Bytes go in through [`Parser::process_data`],
//! ordered [`TerminalEvent`]s come out. The parser holds no screen
//! reference and carries its state across calls, so sequences split
//! across reads parse identically to a single contiguous read.

use tracing::debug;

use super::charset::Charsets;
use super::event::TerminalEvent;
use crate::core::{AttrFlags, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Escape,
    Csi,
    Osc,
    Dcs,
    /// SOS, PM and APC strings, consumed and discarded
    StringPassThrough,
    /// ESC ( ) * + seen, next byte designates the charset for slot n
    Designate(usize),
}

/// Missing or malformed CSI parameters parse to this sentinel
const PARAM_DEFAULT: i32 = -1;

/// The escape sequence parser
#[derive(Debug)]
pub struct Parser {
    state: State,
    /// Pending printable bytes, possibly ending in an incomplete UTF-8
    /// sequence carried over to the next call
    text: Vec<u8>,
    /// Raw CSI parameter characters
    params: String,
    private: bool,
    intermediates: Vec<u8>,
    /// OSC/DCS payload accumulator
    payload: Vec<u8>,
    /// Inside a string, an ESC was seen and ST's backslash is awaited
    payload_esc: bool,
    charsets: Charsets,
    // SGR accumulation state, emitted whole on every SGR
    fg: Color,
    bg: Color,
    attrs: AttrFlags,
    events: Vec<TerminalEvent>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            text: Vec::new(),
            params: String::new(),
            private: false,
            intermediates: Vec::new(),
            payload: Vec::new(),
            payload_esc: false,
            charsets: Charsets::default(),
            fg: Color::Default,
            bg: Color::Default,
            attrs: AttrFlags::empty(),
            events: Vec::new(),
        }
    }

    /// Discard all parser state, including any partial sequence
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current SGR state the parser would stamp on the next text
    pub fn attributes(&self) -> (Color, Color, AttrFlags) {
        (self.fg, self.bg, self.attrs)
    }

    /// Feed a chunk of bytes, returning the events they complete
    pub fn process_data(&mut self, data: &[u8]) -> Vec<TerminalEvent> {
        for &byte in data {
            self.process_byte(byte);
        }
        self.flush_text(true);
        std::mem::take(&mut self.events)
    }

    fn process_byte(&mut self, byte: u8) {
        match self.state {
            State::Normal => self.normal_byte(byte),
            State::Escape => self.escape_byte(byte),
            State::Csi => self.csi_byte(byte),
            State::Osc | State::Dcs | State::StringPassThrough => self.string_byte(byte),
            State::Designate(slot) => {
                self.charsets.designate(slot, byte);
                self.state = State::Normal;
            }
        }
    }

    fn normal_byte(&mut self, byte: u8) {
        if byte >= 0x20 && byte != 0x7f {
            self.text.push(byte);
            return;
        }
        self.flush_text(false);
        match byte {
            0x07 => self.events.push(TerminalEvent::Bell),
            0x08 => self.events.push(TerminalEvent::Backspace),
            0x09 => self.events.push(TerminalEvent::TabForward(1)),
            0x0a | 0x0b => self.events.push(TerminalEvent::LineFeed),
            0x0c => self.events.push(TerminalEvent::FormFeed),
            0x0d => self.events.push(TerminalEvent::CarriageReturn),
            0x0e => self.charsets.select(1),
            0x0f => self.charsets.select(0),
            0x1b => self.state = State::Escape,
            _ => {}
        }
    }

    fn escape_byte(&mut self, byte: u8) {
        self.state = State::Normal;
        match byte {
            b'[' => {
                self.params.clear();
                self.private = false;
                self.intermediates.clear();
                self.state = State::Csi;
            }
            b']' => {
                self.payload.clear();
                self.payload_esc = false;
                self.state = State::Osc;
            }
            b'P' => {
                self.payload.clear();
                self.payload_esc = false;
                self.state = State::Dcs;
            }
            b'X' | b'^' | b'_' => {
                self.payload.clear();
                self.payload_esc = false;
                self.state = State::StringPassThrough;
            }
            b'(' => self.state = State::Designate(0),
            b')' => self.state = State::Designate(1),
            b'*' => self.state = State::Designate(2),
            b'+' => self.state = State::Designate(3),
            b'D' => self.events.push(TerminalEvent::Index),
            b'E' => self.events.push(TerminalEvent::NextLine),
            b'H' => self.events.push(TerminalEvent::SetTabStop),
            b'M' => self.events.push(TerminalEvent::ReverseIndex),
            b'7' => self.events.push(TerminalEvent::SaveCursor),
            b'8' => self.events.push(TerminalEvent::RestoreCursor),
            b'=' => self.events.push(TerminalEvent::KeypadApplicationMode(true)),
            b'>' => self.events.push(TerminalEvent::KeypadApplicationMode(false)),
            b'c' => {
                let events = std::mem::take(&mut self.events);
                self.reset();
                self.events = events;
                self.events.push(TerminalEvent::FullReset);
            }
            b'\\' => {} // stray ST
            other => {
                debug!(byte = other, "unhandled escape command");
            }
        }
    }

    fn csi_byte(&mut self, byte: u8) {
        match byte {
            b'0'..=b'9' | b';' => self.params.push(byte as char),
            b'?' => self.private = true,
            0x20..=0x2f => self.intermediates.push(byte),
            0x40..=0x7e => {
                self.state = State::Normal;
                self.dispatch_csi(byte);
            }
            0x1b => self.state = State::Escape,
            other => {
                debug!(byte = other, "aborting malformed CSI sequence");
                self.state = State::Normal;
            }
        }
    }

    fn string_byte(&mut self, byte: u8) {
        if self.payload_esc {
            self.payload_esc = false;
            if byte == b'\\' {
                self.finish_string();
            } else {
                // ESC terminated the string by itself, reprocess
                self.finish_string();
                self.state = State::Escape;
                self.escape_byte(byte);
            }
            return;
        }
        match byte {
            0x07 | 0x9c => self.finish_string(),
            0x1b => self.payload_esc = true,
            _ => self.payload.push(byte),
        }
    }

    fn finish_string(&mut self) {
        let payload = String::from_utf8_lossy(&self.payload).into_owned();
        match self.state {
            State::Osc => self.events.push(TerminalEvent::OscPayload(payload)),
            State::Dcs => self.events.push(TerminalEvent::DcsPayload(payload)),
            _ => {}
        }
        self.payload.clear();
        self.state = State::Normal;
    }

    /// Decode and emit the pending printable run
    ///
    /// At the end of a chunk an incomplete trailing UTF-8 sequence stays
    /// buffered for the next call; mid-stream it is malformed and each
    /// offending byte becomes U+FFFD.
    fn flush_text(&mut self, end_of_chunk: bool) {
        if self.text.is_empty() {
            return;
        }
        let mut out = String::new();
        let mut bytes = self.text.as_slice();
        let mut carry: Vec<u8> = Vec::new();
        loop {
            match std::str::from_utf8(bytes) {
                Ok(s) => {
                    out.extend(s.chars().map(|c| self.charsets.map(c)));
                    break;
                }
                Err(e) => {
                    let (valid, rest) = bytes.split_at(e.valid_up_to());
                    // Safe split point, the prefix is valid
                    if let Ok(s) = std::str::from_utf8(valid) {
                        out.extend(s.chars().map(|c| self.charsets.map(c)));
                    }
                    match e.error_len() {
                        Some(n) => {
                            out.push('\u{fffd}');
                            bytes = &rest[n..];
                        }
                        None => {
                            if end_of_chunk {
                                carry = rest.to_vec();
                            } else {
                                out.push('\u{fffd}');
                            }
                            break;
                        }
                    }
                }
            }
        }
        self.text = carry;
        if !out.is_empty() {
            self.events.push(TerminalEvent::Text(out));
        }
    }

    // ------------------------------------------------------------------
    // CSI dispatch

    fn parsed_params(&self) -> Vec<i32> {
        self.params
            .split(';')
            .map(|p| p.parse().unwrap_or(PARAM_DEFAULT))
            .collect()
    }

    /// Parameter i, with missing and sentinel values defaulted
    fn param(params: &[i32], i: usize, default: u16) -> u16 {
        match params.get(i) {
            Some(&v) if v >= 0 => v.min(u16::MAX as i32) as u16,
            _ => default,
        }
    }

    /// Count parameter: defaulted to 1, zero treated as 1
    fn count(params: &[i32], i: usize) -> u16 {
        Self::param(params, i, 1).max(1)
    }

    fn dispatch_csi(&mut self, final_byte: u8) {
        let params = self.parsed_params();
        if !self.intermediates.is_empty() {
            debug!(
                final_byte,
                intermediates = ?self.intermediates,
                "ignoring CSI sequence with intermediates"
            );
            return;
        }
        let event = match final_byte {
            b'A' => TerminalEvent::CursorUp(Self::count(&params, 0)),
            b'B' => TerminalEvent::CursorDown(Self::count(&params, 0)),
            b'C' => TerminalEvent::CursorForward(Self::count(&params, 0)),
            b'D' => TerminalEvent::CursorBackward(Self::count(&params, 0)),
            b'E' => TerminalEvent::CursorNextLine(Self::count(&params, 0)),
            b'F' => TerminalEvent::CursorPreviousLine(Self::count(&params, 0)),
            b'G' => TerminalEvent::CursorColumn(Self::count(&params, 0) - 1),
            b'H' | b'f' => TerminalEvent::CursorPosition {
                row: Self::count(&params, 0) - 1,
                col: Self::count(&params, 1) - 1,
            },
            b'J' => match Self::param(&params, 0, 0) {
                0 => TerminalEvent::ClearScreenFromCursor,
                1 => TerminalEvent::ClearScreenToCursor,
                2 | 3 => TerminalEvent::ClearScreen,
                mode => {
                    debug!(mode, "unknown ED mode");
                    return;
                }
            },
            b'K' => match Self::param(&params, 0, 0) {
                0 => TerminalEvent::ClearLineFromCursor,
                1 => TerminalEvent::ClearLineToCursor,
                2 => TerminalEvent::ClearLine,
                mode => {
                    debug!(mode, "unknown EL mode");
                    return;
                }
            },
            b'L' => TerminalEvent::InsertLines(Self::count(&params, 0)),
            b'M' => TerminalEvent::DeleteLines(Self::count(&params, 0)),
            b'@' => TerminalEvent::InsertChars(Self::count(&params, 0)),
            b'P' => TerminalEvent::DeleteChars(Self::count(&params, 0)),
            b'X' => TerminalEvent::EraseChars(Self::count(&params, 0)),
            b'S' => TerminalEvent::ScrollUp(Self::count(&params, 0)),
            b'T' => TerminalEvent::ScrollDown(Self::count(&params, 0)),
            b'I' => TerminalEvent::TabForward(Self::count(&params, 0)),
            b'Z' => TerminalEvent::TabBackward(Self::count(&params, 0)),
            b'm' => {
                self.apply_sgr(&params);
                return;
            }
            b'r' => {
                let bottom = match params.get(1) {
                    Some(&v) if v > 0 => Some(v.min(u16::MAX as i32) as u16 - 1),
                    _ => None,
                };
                TerminalEvent::SetScrollRegion {
                    top: Self::count(&params, 0) - 1,
                    bottom,
                }
            }
            b's' => TerminalEvent::SaveCursor,
            b'u' => TerminalEvent::RestoreCursor,
            b'n' => match Self::param(&params, 0, 0) {
                5 => TerminalEvent::DeviceStatusReport,
                6 => TerminalEvent::CursorPositionReport,
                mode => {
                    debug!(mode, "unknown DSR request");
                    return;
                }
            },
            b'g' => match Self::param(&params, 0, 0) {
                0 => TerminalEvent::ClearTabStop,
                3 => TerminalEvent::ClearAllTabStops,
                mode => {
                    debug!(mode, "unknown TBC mode");
                    return;
                }
            },
            b'h' | b'l' => {
                let enable = final_byte == b'h';
                for i in 0..params.len().max(1) {
                    let mode = Self::param(&params, i, 0);
                    self.dispatch_mode(mode, enable);
                }
                return;
            }
            other => {
                debug!(
                    final_byte = other,
                    params = %self.params,
                    "unhandled CSI sequence"
                );
                return;
            }
        };
        self.events.push(event);
    }

    fn dispatch_mode(&mut self, mode: u16, enable: bool) {
        if !self.private {
            self.events.push(TerminalEvent::SetMode { mode, enable });
            return;
        }
        match mode {
            25 => self.events.push(TerminalEvent::SetCursorVisible(enable)),
            47 | 1047 => self.events.push(TerminalEvent::UseAlternateBuffer(enable)),
            1049 => {
                // Save/restore travels with the buffer switch
                if enable {
                    self.events.push(TerminalEvent::SaveCursor);
                    self.events.push(TerminalEvent::UseAlternateBuffer(true));
                } else {
                    self.events.push(TerminalEvent::UseAlternateBuffer(false));
                    self.events.push(TerminalEvent::RestoreCursor);
                }
            }
            _ => self
                .events
                .push(TerminalEvent::SetPrivateMode { mode, enable }),
        }
    }

    // ------------------------------------------------------------------
    // SGR

    fn apply_sgr(&mut self, params: &[i32]) {
        let mut i = 0;
        while i < params.len() {
            // Missing parameters mean reset, so ESC[m clears everything
            let p = params[i].max(0);
            match p {
                0 => {
                    self.fg = Color::Default;
                    self.bg = Color::Default;
                    self.attrs = AttrFlags::empty();
                }
                1 => self.attrs |= AttrFlags::BOLD,
                2 => self.attrs |= AttrFlags::DIM,
                3 => self.attrs |= AttrFlags::ITALIC,
                4 => self.attrs |= AttrFlags::UNDERLINE,
                5 => self.attrs |= AttrFlags::BLINK,
                7 => self.attrs |= AttrFlags::REVERSE,
                9 => self.attrs |= AttrFlags::STRIKETHROUGH,
                22 => self.attrs &= !(AttrFlags::BOLD | AttrFlags::DIM),
                23 => self.attrs &= !AttrFlags::ITALIC,
                24 => self.attrs &= !AttrFlags::UNDERLINE,
                25 => self.attrs &= !AttrFlags::BLINK,
                27 => self.attrs &= !AttrFlags::REVERSE,
                29 => self.attrs &= !AttrFlags::STRIKETHROUGH,
                30..=37 => self.fg = Color::Indexed((p - 30) as u8),
                90..=97 => self.fg = Color::Indexed((p - 90 + 8) as u8),
                40..=47 => self.bg = Color::Indexed((p - 40) as u8),
                100..=107 => self.bg = Color::Indexed((p - 100 + 8) as u8),
                39 => self.fg = Color::Default,
                49 => self.bg = Color::Default,
                // Extended color introducers consume their sub-parameters
                // even when the form itself is unsupported, so the codes
                // after them stay aligned
                38 | 48 => match params.get(i + 1) {
                    Some(&5) => {
                        if let Some(&n) = params.get(i + 2) {
                            if n >= 0 {
                                let color = Color::indexed((n as u32 % 256) as u16);
                                if p == 38 {
                                    self.fg = color;
                                } else {
                                    self.bg = color;
                                }
                            }
                        }
                        i += 2;
                    }
                    Some(&2) => {
                        // Truecolor is not rendered, skip r;g;b
                        i += 4;
                    }
                    _ => {
                        debug!(code = p, "malformed extended color sequence");
                    }
                },
                other => {
                    debug!(code = other, "unhandled SGR code");
                }
            }
            i += 1;
        }
        self.events.push(TerminalEvent::SetAttributes {
            fg: self.fg,
            bg: self.bg,
            attrs: self.attrs,
        });
    }
}
