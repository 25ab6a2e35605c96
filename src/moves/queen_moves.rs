use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::Color;
use crate::moves::bishop_moves::bishop_targets;
use crate::moves::rook_moves::rook_targets;

/// Pseudo-legal queen destinations: the union of rook and bishop rays.
#[inline]
pub fn queen_targets(board: &BoardState, pos: u64, color: Color) -> u64 {
    rook_targets(board, pos, color) | bishop_targets(board, pos, color)
}
