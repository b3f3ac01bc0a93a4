//! Error types for the curve engine

use thiserror::Error;

/// Errors surfaced by every core operation
///
/// None of these are retried or logged inside the crate; the caller decides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// Account or instruction bytes do not match the fixed layout
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Slippage tolerance outside [0, 10000) basis points
    #[error("invalid slippage tolerance: {0} bps (must be below 10000)")]
    InvalidTolerance(u16),

    /// An intermediate or final value left the representable range
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// An argument cannot be written in the wire format
    #[error("cannot encode {field}: {len} bytes exceeds limit of {limit}")]
    Encoding {
        field: &'static str,
        len: usize,
        limit: usize,
    },

    /// Trade attempted against a curve that has already graduated
    #[error("bonding curve is complete; trading has moved off the curve")]
    CurveComplete,
}

/// Reasons a byte buffer failed to decode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer too short: need {needed} bytes at offset {offset}, have {len}")]
    TooShort {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("unknown instruction discriminator {0:?}")]
    UnknownDiscriminator([u8; 8]),

    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    #[error("{0} trailing bytes after instruction payload")]
    TrailingBytes(usize),
}
