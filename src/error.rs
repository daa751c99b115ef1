//! Error types

use thiserror::Error;

/// Errors surfaced by the engine's public API
///
/// The byte-processing path itself never fails: malformed input is
/// discarded, not reported.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid terminal dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: u16, cols: u16 },
}
