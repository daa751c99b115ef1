//! Keyboard input encoding
//!
//! Maps key presses to the byte sequences a VT100-style host expects.
//! The encoding is fixed; application cursor keys mode is not tracked,
//! arrows always send the CSI form.

/// A key press to encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character, sent as UTF-8
    Char(char),
    Enter,
    Backspace,
    Tab,
    Escape,
    Up,
    Down,
    Right,
    Left,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Insert,
}

/// Encode a key press into the bytes to send to the host
pub fn encode_key(key: Key) -> Vec<u8> {
    match key {
        Key::Char(c) => {
            let mut buf = [0u8; 4];
            c.encode_utf8(&mut buf).as_bytes().to_vec()
        }
        Key::Enter => vec![b'\r'],
        Key::Backspace => vec![0x08],
        Key::Tab => vec![b'\t'],
        Key::Escape => vec![0x1b],
        Key::Up => b"\x1b[A".to_vec(),
        Key::Down => b"\x1b[B".to_vec(),
        Key::Right => b"\x1b[C".to_vec(),
        Key::Left => b"\x1b[D".to_vec(),
        Key::Home => b"\x1b[H".to_vec(),
        Key::End => b"\x1b[F".to_vec(),
        Key::PageUp => b"\x1b[5~".to_vec(),
        Key::PageDown => b"\x1b[6~".to_vec(),
        Key::Delete => b"\x1b[3~".to_vec(),
        Key::Insert => b"\x1b[2~".to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_characters() {
        assert_eq!(encode_key(Key::Char('a')), b"a");
        assert_eq!(encode_key(Key::Char('é')), "é".as_bytes());
        assert_eq!(encode_key(Key::Char('語')), "語".as_bytes());
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(encode_key(Key::Enter), b"\r");
        assert_eq!(encode_key(Key::Backspace), [0x08]);
        assert_eq!(encode_key(Key::Tab), b"\t");
        assert_eq!(encode_key(Key::Escape), [0x1b]);
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(encode_key(Key::Up), b"\x1b[A");
        assert_eq!(encode_key(Key::Down), b"\x1b[B");
        assert_eq!(encode_key(Key::Right), b"\x1b[C");
        assert_eq!(encode_key(Key::Left), b"\x1b[D");
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(encode_key(Key::Home), b"\x1b[H");
        assert_eq!(encode_key(Key::End), b"\x1b[F");
        assert_eq!(encode_key(Key::PageUp), b"\x1b[5~");
        assert_eq!(encode_key(Key::PageDown), b"\x1b[6~");
        assert_eq!(encode_key(Key::Delete), b"\x1b[3~");
        assert_eq!(encode_key(Key::Insert), b"\x1b[2~");
    }
}
