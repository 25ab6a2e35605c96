//! Canonical chess-rule constants.
//!
//! Static rule-related literals shared across the board representation, move
//! generation, and the termination logic.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const RANK_1: u64 = 0x0000_0000_0000_00ff;
pub const RANK_2: u64 = 0x0000_0000_0000_ff00;
pub const RANK_7: u64 = 0x00ff_0000_0000_0000;
pub const RANK_8: u64 = 0xff00_0000_0000_0000;

/// Both back ranks; a pawn landing here promotes.
pub const PROMOTION_RANKS: u64 = RANK_1 | RANK_8;

/// Half-move clock threshold for the 50-move rule (100 half moves).
pub const FIFTY_MOVE_RULE_HALFMOVES: u16 = 100;

/// Occurrence count at which a recorded position becomes a repetition draw.
pub const THREEFOLD_REPETITION_COUNT: u32 = 3;

/// Material values in pawns: pawn, knight, bishop, rook, queen.
/// Kings carry no material value.
pub const MATERIAL_VALUES: [u32; 5] = [1, 3, 3, 5, 9];

/// Evaluation magnitude of a delivered checkmate. Search subtracts the
/// number of plies spent reaching the mate, so faster mates score higher.
pub const MATE_SCORE: i32 = 9999;

/// A side with less total material than this and no pawns cannot force mate.
///
/// This is the original threshold heuristic, kept on purpose: it covers the
/// bare-king and king-plus-minor endings but is not a full FIDE
/// insufficient-material classifier.
pub const INSUFFICIENT_MATERIAL_THRESHOLD: u32 = 4;
