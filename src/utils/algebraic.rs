//! Square and bitboard conversions for long algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the internal
//! square-index/one-hot-bitboard representations used by the FEN parser and
//! the board renderer.

use crate::errors::ChessError;
use crate::game_state::chess_types::Square;

/// Convert long algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraicSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraicSquare(square.to_owned()));
    }

    let file_index = file - b'a';
    let rank_index = rank - b'1';
    Ok(rank_index * 8 + file_index)
}

/// Convert long algebraic notation (for example: "e4") to a one-hot bitboard.
#[inline]
pub fn algebraic_to_bitboard(square: &str) -> Result<u64, ChessError> {
    let index = algebraic_to_square(square)?;
    Ok(1u64 << index)
}

/// Convert a square index (`0..=63`) to long algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, ChessError> {
    if square > 63 {
        return Err(ChessError::SquareIndexOutOfRange(square));
    }

    let file = square % 8;
    let rank = square / 8;
    let file_char = char::from(b'a' + file);
    let rank_char = char::from(b'1' + rank);

    Ok(format!("{file_char}{rank_char}"))
}

/// Convert a square index (`0..=63`) to a one-hot bitboard.
#[inline]
pub fn square_to_bitboard(square: Square) -> Result<u64, ChessError> {
    if square > 63 {
        return Err(ChessError::SquareIndexOutOfRange(square));
    }
    Ok(1u64 << square)
}

/// Convert a one-hot bitboard to a square index.
#[inline]
pub fn bitboard_to_square(bitboard: u64) -> Result<Square, ChessError> {
    if bitboard.count_ones() != 1 {
        return Err(ChessError::InvalidSquareBitboard(bitboard));
    }
    Ok(bitboard.trailing_zeros() as Square)
}

/// Convert a one-hot bitboard to long algebraic notation (for example: "e4").
#[inline]
pub fn bitboard_to_algebraic(bitboard: u64) -> Result<String, ChessError> {
    square_to_algebraic(bitboard_to_square(bitboard)?)
}
