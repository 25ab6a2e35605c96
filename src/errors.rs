//! Errors used throughout the chess core.
//!
//! `ChessError` is the single error type returned by parsing utilities and
//! fallible constructors. Rejecting an illegal move is deliberately *not* an
//! error: legality checks are a normal part of move-generation flow, so those
//! paths report a plain `bool` instead (see `BoardState::push_move` and
//! `Chessboard::execute_move`).

use std::error::Error;
use std::fmt;

/// Unified error type for the chess core.
///
/// Each variant corresponds to a malformed-input failure mode detected at
/// construction or parse time. Variants carry the offending token so callers
/// can log or display precise diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A FEN string had malformed structure (missing fields, bad rank
    /// widths, trailing garbage). Carries the offending input.
    InvalidFenString(String),
    /// A single character inside a FEN field was not a valid token.
    InvalidFenToken(char),
    /// An algebraic square string failed to parse (not `a1`..`h8`).
    InvalidAlgebraicSquare(String),
    /// A square index was outside `0..=63`.
    SquareIndexOutOfRange(u8),
    /// A bitboard that must be one-hot was empty or had multiple bits set.
    InvalidSquareBitboard(u64),
    /// A time-control string was not of the `minutes+increment` form.
    InvalidTimeControl(String),
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::InvalidFenString(detail) => {
                write!(f, "invalid FEN string: {detail}")
            }
            ChessError::InvalidFenToken(token) => {
                write!(f, "invalid FEN token '{token}'")
            }
            ChessError::InvalidAlgebraicSquare(square) => {
                write!(f, "invalid algebraic square '{square}'")
            }
            ChessError::SquareIndexOutOfRange(index) => {
                write!(f, "square index {index} out of range 0..=63")
            }
            ChessError::InvalidSquareBitboard(bitboard) => {
                write!(
                    f,
                    "bitboard {bitboard:#018x} must contain exactly one set bit"
                )
            }
            ChessError::InvalidTimeControl(control) => {
                write!(f, "invalid time control '{control}'")
            }
        }
    }
}

impl Error for ChessError {}
