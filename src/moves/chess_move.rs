//! The `Move` value type.

use crate::game_state::chess_types::{Color, PieceKind};

/// A single chess move, immutable once created.
///
/// Source and destination are one-hot bitboards. `promotion` is set only for
/// pawn moves reaching the last rank. Two moves are equal iff all five fields
/// are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub src: u64,
    pub dst: u64,
    pub piece: PieceKind,
    pub color: Color,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub fn new(src: u64, dst: u64, piece: PieceKind, color: Color) -> Self {
        Move {
            src,
            dst,
            piece,
            color,
            promotion: None,
        }
    }

    #[inline]
    pub fn promoting(
        src: u64,
        dst: u64,
        color: Color,
        promotion: PieceKind,
    ) -> Self {
        Move {
            src,
            dst,
            piece: PieceKind::Pawn,
            color,
            promotion: Some(promotion),
        }
    }
}
