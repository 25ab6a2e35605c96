//! Crate root module declarations for the Pawnstorm chess core.
//!
//! This file exposes all top-level subsystems (board and game state, per-piece
//! move generation, search, clock, and utility helpers) so binaries, tests,
//! and external front-ends can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod chessboard;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod chess_move;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod search {
    pub mod engine;
    pub mod minimax;
}

pub mod clock;

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod render_board;
}
