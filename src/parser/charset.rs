//! Character set designation and mapping
//!
//! Four slots G0-G3 are designated via ESC ( ) * + and one slot is active
//! at a time (SO/SI select G1/G0). Only the DEC Special Graphics set ('0')
//! remaps anything; every other designator passes characters through.

/// The G0-G3 designation state plus the active slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charsets {
    /// Designators for G0-G3, e.g. b'B' (US ASCII) or b'0' (DEC graphics)
    slots: [u8; 4],
    active: usize,
}

impl Default for Charsets {
    fn default() -> Self {
        Self {
            slots: [b'B'; 4],
            active: 0,
        }
    }
}

impl Charsets {
    /// Designate a slot (0-3). Out-of-range slots are ignored.
    pub fn designate(&mut self, slot: usize, designator: u8) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = designator;
        }
    }

    /// Select the active slot (SI selects 0, SO selects 1)
    pub fn select(&mut self, slot: usize) {
        if slot < self.slots.len() {
            self.active = slot;
        }
    }

    /// Map a printable character through the active charset
    pub fn map(&self, ch: char) -> char {
        if self.slots[self.active] == b'0' {
            map_dec_graphics(ch)
        } else {
            ch
        }
    }
}

/// DEC Special Graphics: '_'..='~' map to line-drawing glyphs
fn map_dec_graphics(ch: char) -> char {
    match ch {
        '_' => '\u{00A0}', // non-breaking space
        '`' => '\u{25C6}', // diamond
        'a' => '\u{2591}', // checkerboard
        'b' => '\u{2409}', // HT symbol
        'c' => '\u{240C}', // FF symbol
        'd' => '\u{240D}', // CR symbol
        'e' => '\u{240A}', // LF symbol
        'f' => '\u{00B0}', // degree
        'g' => '\u{00B1}', // plus/minus
        'h' => '\u{2424}', // NL symbol
        'i' => '\u{240B}', // VT symbol
        'j' => '\u{2518}', // lower-right corner
        'k' => '\u{2510}', // upper-right corner
        'l' => '\u{250C}', // upper-left corner
        'm' => '\u{2514}', // lower-left corner
        'n' => '\u{253C}', // crossing lines
        'o' => '\u{23BA}', // horizontal line, scan 1
        'p' => '\u{23BB}', // horizontal line, scan 3
        'q' => '\u{2500}', // horizontal line, scan 5
        'r' => '\u{23BC}', // horizontal line, scan 7
        's' => '\u{23BD}', // horizontal line, scan 9
        't' => '\u{251C}', // left tee
        'u' => '\u{2524}', // right tee
        'v' => '\u{2534}', // bottom tee
        'w' => '\u{252C}', // top tee
        'x' => '\u{2502}', // vertical line
        'y' => '\u{2264}', // less than or equal
        'z' => '\u{2265}', // greater than or equal
        '{' => '\u{03C0}', // pi
        '|' => '\u{2260}', // not equal
        '}' => '\u{00A3}', // pound sign
        '~' => '\u{00B7}', // centered dot
        other => other,
    }
}
