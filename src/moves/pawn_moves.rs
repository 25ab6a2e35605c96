//! Pawn destination masks.
//!
//! Single pushes require an empty target, double pushes are only available
//! from the pawn's home rank when the single-push square was also empty, and
//! diagonal captures only hit enemy occupancy or the en-passant square.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::{RANK_2, RANK_7};
use crate::game_state::chess_types::Color;

/// Pseudo-legal pawn destinations from a one-hot `pos`.
pub fn pawn_targets(board: &BoardState, pos: u64, color: Color) -> u64 {
    let file = pos.trailing_zeros() % 8;
    let empty = !board.occupied_all();
    let capture_targets = board.occupied(color.opposite()) | board.en_passant_square();

    let mut targets = 0u64;

    match color {
        Color::Light => {
            targets |= (pos << 8) & empty;
            // Double push only when the single push went through.
            if pos & RANK_2 != 0 && targets != 0 {
                targets |= (pos << 16) & empty;
            }
            if file != 0 {
                targets |= (pos << 7) & capture_targets;
            }
            if file != 7 {
                targets |= (pos << 9) & capture_targets;
            }
        }
        Color::Dark => {
            targets |= (pos >> 8) & empty;
            if pos & RANK_7 != 0 && targets != 0 {
                targets |= (pos >> 16) & empty;
            }
            if file != 0 {
                targets |= (pos >> 9) & capture_targets;
            }
            if file != 7 {
                targets |= (pos >> 7) & capture_targets;
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::pawn_targets;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;

    #[test]
    fn home_rank_pawn_has_single_and_double_push() {
        let board = BoardState::from_fen(STARTING_POSITION_FEN).expect("startpos parses");
        let e2 = 1u64 << 12;
        let expected = (1u64 << 20) | (1u64 << 28);
        assert_eq!(pawn_targets(&board, e2, Color::Light), expected);
    }

    #[test]
    fn blocked_pawn_has_no_double_push() {
        // Light pawn e2, blocker e3: no push at all, so no double push either.
        let board =
            BoardState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("fen parses");
        let e2 = 1u64 << 12;
        assert_eq!(pawn_targets(&board, e2, Color::Light), 0);
    }

    #[test]
    fn edge_pawn_does_not_wrap_captures() {
        // Light pawn a4 with dark piece on h4: no wraparound capture.
        let board =
            BoardState::from_fen("4k3/8/8/8/P6r/8/8/4K3 w - - 0 1").expect("fen parses");
        let a4 = 1u64 << 24;
        assert_eq!(pawn_targets(&board, a4, Color::Light), 1u64 << 32);
    }

    #[test]
    fn capture_hits_enemy_and_en_passant_square() {
        // Light pawn e5, dark pawn d5 just double-pushed (en passant on d6),
        // dark knight f6 capturable normally.
        let board =
            BoardState::from_fen("4k3/8/5n2/3pP3/8/8/8/4K3 w - d6 0 1").expect("fen parses");
        let e5 = 1u64 << 36;
        let expected = (1u64 << 44) | (1u64 << 43) | (1u64 << 45);
        assert_eq!(pawn_targets(&board, e5, Color::Light), expected);
    }
}
