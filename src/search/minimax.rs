//! Alpha-beta minimax over raw board states.
//!
//! The search works on `BoardState` directly rather than `Chessboard` so it
//! can skip the game-level bookkeeping: legality is checked by pushing onto
//! a scratch copy and testing for self-check, and no-legal-move detection
//! falls out of the same loop. The half-move and repetition draws are
//! invisible at this layer.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::MATE_SCORE;
use crate::game_state::chess_types::Color;
use crate::moves::chess_move::Move;

/// Search depth in plies used when the caller has no preference.
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

/// Find the best move for `to_move` looking `depth` plies ahead.
///
/// Returns the evaluation from light's point of view and the chosen move.
/// The move is `None` when the side to move has no legal moves; the score
/// then reports the mate or stalemate. Checkmate scores are offset by the
/// number of plies spent, so a faster mate always wins the comparison.
///
/// Move ordering comes from `all_pseudo_legal_moves`, which shuffles within
/// each piece's move group; equally-scored moves are therefore picked at
/// random from run to run.
pub fn search_best_move(
    board_state: &BoardState,
    to_move: Color,
    depth: u8,
) -> (i32, Option<Move>) {
    minimax(board_state, to_move, depth, depth, -MATE_SCORE, MATE_SCORE)
}

fn minimax(
    board_state: &BoardState,
    to_move: Color,
    depth: u8,
    initial_depth: u8,
    mut alpha: i32,
    mut beta: i32,
) -> (i32, Option<Move>) {
    let maximizing = to_move == Color::Light;
    let mut final_eval = if maximizing { -MATE_SCORE } else { MATE_SCORE };
    let mut best_move = None;
    let mut no_legal_moves = true;

    for mv in board_state.all_pseudo_legal_moves(to_move) {
        let mut scratch = board_state.clone();
        if !scratch.push_move(&mv, false) || scratch.king_in_check(to_move) {
            continue;
        }
        no_legal_moves = false;
        // Leaf nodes only need to know whether a legal move exists.
        if depth == 0 {
            break;
        }

        let (eval, _) = minimax(
            &scratch,
            to_move.opposite(),
            depth - 1,
            initial_depth,
            alpha,
            beta,
        );
        if maximizing {
            if eval > final_eval {
                final_eval = eval;
                best_move = Some(mv);
            }
            alpha = alpha.max(eval);
        } else {
            if eval < final_eval {
                final_eval = eval;
                best_move = Some(mv);
            }
            beta = beta.min(eval);
        }
        if beta <= alpha {
            break;
        }
    }

    if no_legal_moves {
        if board_state.king_in_check(to_move) {
            let mate = MATE_SCORE - i32::from(initial_depth) + i32::from(depth);
            let score = if to_move == Color::Dark { mate } else { -mate };
            return (score, None);
        }
        return (0, None);
    }
    if depth == 0 {
        let material = board_state.material_count(Color::Light) as i32
            - board_state.material_count(Color::Dark) as i32;
        return (material, best_move);
    }

    (final_eval, best_move)
}
