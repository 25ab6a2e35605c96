//! King destination masks, including castling.
//!
//! Castling destinations are offered only when the rights flag survives, the
//! rook still sits on its origin square, every square between king and rook
//! is empty, and none of the king's start/transit/destination squares is
//! attacked. Attack detection asks for king moves *without* castling, which
//! keeps the castling check from recursing into itself.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{
    Color, PieceKind, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE, CASTLE_LIGHT_KINGSIDE,
    CASTLE_LIGHT_QUEENSIDE,
};

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

// Light castling geometry (e1 king, a1/h1 rooks).
const LIGHT_KINGSIDE_PATH: u64 = 0x70; // e1 f1 g1
const LIGHT_KINGSIDE_EMPTY: u64 = 0x60; // f1 g1
const LIGHT_QUEENSIDE_PATH: u64 = 0x1c; // c1 d1 e1
const LIGHT_QUEENSIDE_EMPTY: u64 = 0x0e; // b1 c1 d1

// Dark castling geometry (e8 king, a8/h8 rooks).
const DARK_KINGSIDE_PATH: u64 = 0x7000_0000_0000_0000;
const DARK_KINGSIDE_EMPTY: u64 = 0x6000_0000_0000_0000;
const DARK_QUEENSIDE_PATH: u64 = 0x1c00_0000_0000_0000;
const DARK_QUEENSIDE_EMPTY: u64 = 0x0e00_0000_0000_0000;

/// Pseudo-legal king destinations from a one-hot `pos`.
///
/// `include_castling` is false when the caller is building an attack map.
pub fn king_targets(board: &BoardState, pos: u64, color: Color, include_castling: bool) -> u64 {
    let square = pos.trailing_zeros() as usize;
    let mut targets = KING_ATTACKS[square] & !board.occupied(color);

    if include_castling {
        targets |= castling_targets(board, color);
    }

    targets
}

fn castling_targets(board: &BoardState, color: Color) -> u64 {
    let attacked = board.attacked_squares(color.opposite());
    let occupied = board.occupied_all();
    let rights = board.castling_rights();
    let rooks = board.pieces(color, PieceKind::Rook);

    let mut targets = 0u64;

    match color {
        Color::Light => {
            if rights & CASTLE_LIGHT_KINGSIDE != 0
                && rooks & (1u64 << 7) != 0
                && occupied & LIGHT_KINGSIDE_EMPTY == 0
                && attacked & LIGHT_KINGSIDE_PATH == 0
            {
                targets |= 1u64 << 6;
            }
            if rights & CASTLE_LIGHT_QUEENSIDE != 0
                && rooks & 1u64 != 0
                && occupied & LIGHT_QUEENSIDE_EMPTY == 0
                && attacked & LIGHT_QUEENSIDE_PATH == 0
            {
                targets |= 1u64 << 2;
            }
        }
        Color::Dark => {
            if rights & CASTLE_DARK_KINGSIDE != 0
                && rooks & (1u64 << 63) != 0
                && occupied & DARK_KINGSIDE_EMPTY == 0
                && attacked & DARK_KINGSIDE_PATH == 0
            {
                targets |= 1u64 << 62;
            }
            if rights & CASTLE_DARK_QUEENSIDE != 0
                && rooks & (1u64 << 56) != 0
                && occupied & DARK_QUEENSIDE_EMPTY == 0
                && attacked & DARK_QUEENSIDE_PATH == 0
            {
                targets |= 1u64 << 58;
            }
        }
    }

    targets
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file - 1, rank - 1);
        attacks |= set_if_valid(file, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 1);
        attacks |= set_if_valid(file - 1, rank);
        attacks |= set_if_valid(file + 1, rank);
        attacks |= set_if_valid(file - 1, rank + 1);
        attacks |= set_if_valid(file, rank + 1);
        attacks |= set_if_valid(file + 1, rank + 1);

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}

#[cfg(test)]
mod tests {
    use super::{king_targets, KING_ATTACKS};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::Color;

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        assert_eq!(KING_ATTACKS[0].count_ones(), 3);
    }

    #[test]
    fn castling_offered_when_path_is_clear_and_safe() {
        let board =
            BoardState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fen parses");
        let e1 = 1u64 << 4;
        let targets = king_targets(&board, e1, Color::Light, true);
        assert_ne!(targets & (1u64 << 6), 0, "kingside castle missing");
        assert_ne!(targets & (1u64 << 2), 0, "queenside castle missing");
    }

    #[test]
    fn castling_withheld_without_rook_on_origin() {
        // Rights claim KQ but the a1 rook is gone.
        let board =
            BoardState::from_fen("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1").expect("fen parses");
        let e1 = 1u64 << 4;
        let targets = king_targets(&board, e1, Color::Light, true);
        assert_ne!(targets & (1u64 << 6), 0);
        assert_eq!(targets & (1u64 << 2), 0);
    }

    #[test]
    fn castling_withheld_when_between_square_occupied() {
        // Knight on b1 blocks queenside even though c1/d1 are free.
        let board =
            BoardState::from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").expect("fen parses");
        let e1 = 1u64 << 4;
        let targets = king_targets(&board, e1, Color::Light, true);
        assert_eq!(targets & (1u64 << 2), 0);
    }
}
