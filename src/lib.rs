//! vtscreen: a VT100/ANSI terminal emulation engine
//!
//! Bytes from a shell, SSH or Telnet transport go in; a queryable screen
//! model and change notifications come out. The crate does no I/O of its
//! own: the transport feeds [`Engine::process_data`] and carries out the
//! [`TransportRequest`]s it returns, a renderer reads the [`Screen`] and
//! drains its [`ScreenEvent`]s, and key presses are encoded to host bytes
//! with [`input::encode_key`].
//!
//! ```
//! use vtscreen::{Engine, input::{encode_key, Key}};
//!
//! let mut engine = Engine::new(24, 80)?;
//! engine.process_data(b"\x1b[1;31mhello\x1b[0m");
//! assert_eq!(engine.screen().row_text(0), "hello");
//!
//! let bytes = encode_key(Key::Up);
//! assert_eq!(bytes, b"\x1b[A");
//! # Ok::<(), vtscreen::EngineError>(())
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod input;
pub mod parser;

pub use crate::core::{ActiveBuffer, AttrFlags, Cell, Color, CursorPosition, Screen, ScreenEvent};
pub use crate::engine::{Engine, TransportRequest};
pub use crate::error::EngineError;
pub use crate::parser::{Parser, TerminalEvent};
