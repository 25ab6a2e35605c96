use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::Color;

/// Pseudo-legal bishop destinations from a one-hot `pos`.
#[inline]
pub fn bishop_targets(board: &BoardState, pos: u64, color: Color) -> u64 {
    let square = pos.trailing_zeros() as u8;
    bishop_attacks(square, board.occupied_all()) & !board.occupied(color)
}

/// Bishop attack mask against an occupancy; rays include the first blocker.
pub fn bishop_attacks(square: u8, occupancy: u64) -> u64 {
    let sq = square as i32;
    let mut attacks = 0u64;

    attacks |= trace_ray(sq, 1, 1, occupancy);
    attacks |= trace_ray(sq, 1, -1, occupancy);
    attacks |= trace_ray(sq, -1, 1, occupancy);
    attacks |= trace_ray(sq, -1, -1, occupancy);

    attacks
}

fn trace_ray(square: i32, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let target = (rank * 8 + file) as usize;
        let bit = 1u64 << target;
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}
