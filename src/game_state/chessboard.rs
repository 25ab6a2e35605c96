//! Game-level state machine on top of `BoardState`.
//!
//! `Chessboard` tracks whose turn it is, the half-move and full-move
//! counters, reached positions for repetition detection, and derives the
//! game result after every executed move.

use std::collections::HashMap;

use crate::errors::ChessError;
use crate::game_state::board_state::{split_positions, BoardState, PositionKey};
use crate::game_state::chess_rules::{
    FIFTY_MOVE_RULE_HALFMOVES, MATE_SCORE, PROMOTION_RANKS, STARTING_POSITION_FEN,
    THREEFOLD_REPETITION_COUNT,
};
use crate::game_state::chess_types::{Color, GameResult, PieceKind};
use crate::moves::chess_move::Move;
use crate::utils::fen_parser::parse_fen;

/// A full game in progress: board, turn order, counters, and termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chessboard {
    board_state: BoardState,
    to_move: Color,
    halfmove_clock: u16,
    fullmove_number: u16,
    ended: bool,
    no_legal_moves: bool,
    timeout: bool,
    reached_positions: HashMap<PositionKey, u32>,
    last_move_played: Option<Move>,
}

impl Default for Chessboard {
    fn default() -> Self {
        Chessboard::new()
    }
}

impl Chessboard {
    /// A game from the standard starting position.
    pub fn new() -> Self {
        // The starting FEN is a compile-time constant and always parses.
        match Chessboard::from_fen(STARTING_POSITION_FEN) {
            Ok(board) => board,
            Err(_) => unreachable!("starting position FEN is valid"),
        }
    }

    /// A game from an arbitrary position given as a full six-field FEN.
    ///
    /// The reached-position history starts empty; positions before the FEN
    /// cannot count toward threefold repetition.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let parsed = parse_fen(fen)?;
        Ok(Chessboard {
            board_state: parsed.board_state,
            to_move: parsed.side_to_move,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
            ended: false,
            no_legal_moves: false,
            timeout: false,
            reached_positions: HashMap::new(),
            last_move_played: None,
        })
    }

    #[inline]
    pub fn board_state(&self) -> &BoardState {
        &self.board_state
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    #[inline]
    pub fn last_move_played(&self) -> Option<Move> {
        self.last_move_played
    }

    /// True if `mv` is fully legal for the player on move: the source holds
    /// one of their pieces, the destination is pseudo-legal, and the move
    /// does not leave their king in check.
    pub fn validate_move(&self, mv: &Move) -> bool {
        if mv.src & self.board_state.occupied(self.to_move) == 0 {
            return false;
        }
        let mut scratch = self.board_state.clone();
        scratch.push_move(mv, true) && !scratch.king_in_check(self.to_move)
    }

    /// All legal moves from the one-hot `pos` for the player on move.
    pub fn legal_moves_from(&self, pos: u64) -> Vec<Move> {
        if pos & self.board_state.occupied(self.to_move) == 0 {
            return Vec::new();
        }
        self.board_state
            .moves_from(pos)
            .into_iter()
            .filter(|mv| self.validate_move(mv))
            .collect()
    }

    /// Legal destinations from the one-hot `pos` as a bitboard.
    pub fn legal_move_targets(&self, pos: u64) -> u64 {
        self.legal_moves_from(pos)
            .iter()
            .fold(0u64, |acc, mv| acc | mv.dst)
    }

    /// Every legal move available to the player on move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for pos in split_positions(self.board_state.occupied(self.to_move)) {
            moves.extend(self.legal_moves_from(pos));
        }
        moves
    }

    /// Static evaluation of the game from light's point of view: material
    /// difference while in progress, the mate score for a delivered
    /// checkmate, zero for any draw.
    pub fn evaluation(&self) -> i32 {
        match self.result() {
            GameResult::InProgress => {
                self.board_state.material_count(Color::Light) as i32
                    - self.board_state.material_count(Color::Dark) as i32
            }
            GameResult::LightVictoryByCheckmate => MATE_SCORE,
            GameResult::DarkVictoryByCheckmate => -MATE_SCORE,
            _ => 0,
        }
    }

    /// Play `mv`. With `validate` set the move is first checked for full
    /// legality; without it only pseudo-legality guards the push, so callers
    /// must have validated the move themselves.
    ///
    /// Returns `false`, leaving the game unchanged, if the game is over or
    /// the move is rejected.
    pub fn execute_move(&mut self, mv: &Move, validate: bool) -> bool {
        if self.ended || (validate && !self.validate_move(mv)) {
            return false;
        }

        // The half-move clock test reads the pre-move occupancy.
        let pawn_or_capture = self.board_state.is_pawn_or_capture(mv);
        if !self.board_state.push_move(mv, true) {
            return false;
        }

        if pawn_or_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.to_move == Color::Dark {
            self.fullmove_number += 1;
        }
        self.to_move = self.to_move.opposite();

        let key = self.board_state.position_key(self.to_move);
        *self.reached_positions.entry(key).or_insert(0) += 1;

        self.last_move_played = Some(*mv);
        self.ended = self.check_ended();
        true
    }

    /// The piece occupying the one-hot `pos`, if any.
    pub fn piece_at(&self, pos: u64) -> Option<(Color, PieceKind)> {
        self.board_state.piece_at(pos)
    }

    /// True if moving the piece on `src` to `dst` would be a promotion.
    pub fn is_promotion(&self, src: u64, dst: u64) -> bool {
        matches!(self.board_state.piece_at(src), Some((_, PieceKind::Pawn)))
            && dst & PROMOTION_RANKS != 0
    }

    /// Flag the player on move as having run out of time and end the game.
    pub fn raise_timeout(&mut self) {
        self.timeout = true;
        self.ended = true;
    }

    /// The game's result, or `InProgress` while it is still being played.
    ///
    /// A timeout win requires the winner to have mating material; a flag
    /// fall against a bare king is a draw.
    pub fn result(&self) -> GameResult {
        if self.timeout {
            let winner = self.to_move.opposite();
            if self.board_state.has_insufficient_material(winner) {
                return GameResult::DrawByTimeoutAgainstInsufficientMaterial;
            }
            return match winner {
                Color::Light => GameResult::LightVictoryByTimeout,
                Color::Dark => GameResult::DarkVictoryByTimeout,
            };
        }
        if !self.ended {
            return GameResult::InProgress;
        }
        if self.no_legal_moves {
            if self.board_state.king_in_check(self.to_move) {
                return match self.to_move {
                    Color::Light => GameResult::DarkVictoryByCheckmate,
                    Color::Dark => GameResult::LightVictoryByCheckmate,
                };
            }
            return GameResult::DrawByStalemate;
        }
        if self.board_state.has_insufficient_material(Color::Light)
            && self.board_state.has_insufficient_material(Color::Dark)
        {
            return GameResult::DrawByInsufficientMaterial;
        }
        if self
            .reached_positions
            .values()
            .any(|&count| count >= THREEFOLD_REPETITION_COUNT)
        {
            return GameResult::DrawByThreefoldRepetition;
        }
        GameResult::DrawByFiftyMoveRule
    }

    /// Termination test run after each executed move. The ordering decides
    /// which result a position that satisfies several conditions reports:
    /// mate and stalemate outrank the counter-based draws.
    fn check_ended(&mut self) -> bool {
        if self.timeout {
            return true;
        }
        if self.all_legal_moves().is_empty() {
            self.no_legal_moves = true;
            return true;
        }
        if self.halfmove_clock >= FIFTY_MOVE_RULE_HALFMOVES {
            return true;
        }
        if self.board_state.has_insufficient_material(Color::Light)
            && self.board_state.has_insufficient_material(Color::Dark)
        {
            return true;
        }
        self.reached_positions
            .values()
            .any(|&count| count >= THREEFOLD_REPETITION_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::Chessboard;
    use crate::game_state::chess_types::{Color, GameResult, PieceKind};
    use crate::moves::chess_move::Move;
    use crate::utils::algebraic::algebraic_to_bitboard;

    fn bb(square: &str) -> u64 {
        algebraic_to_bitboard(square).expect("valid square")
    }

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let board = Chessboard::new();
        assert_eq!(board.all_legal_moves().len(), 20);
        assert_eq!(board.to_move(), Color::Light);
        assert_eq!(board.result(), GameResult::InProgress);
    }

    #[test]
    fn execute_move_advances_turn_and_counters() {
        let mut board = Chessboard::new();
        let e4 = Move::new(bb("e2"), bb("e4"), PieceKind::Pawn, Color::Light);
        assert!(board.execute_move(&e4, true));

        assert_eq!(board.to_move(), Color::Dark);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.last_move_played(), Some(e4));

        let nf6 = Move::new(bb("g8"), bb("f6"), PieceKind::Knight, Color::Dark);
        assert!(board.execute_move(&nf6, true));
        assert_eq!(board.halfmove_clock(), 1);
        assert_eq!(board.fullmove_number(), 2);
    }

    #[test]
    fn validated_execute_rejects_self_check() {
        // The f2 pawn is pinned against the king by the h4 queen.
        let mut board =
            Chessboard::from_fen("4k3/8/8/8/7q/8/5PP1/4K3 w - - 0 1").expect("fen parses");
        let pinned = Move::new(bb("f2"), bb("f3"), PieceKind::Pawn, Color::Light);
        assert!(!board.execute_move(&pinned, true));
        assert_eq!(board.to_move(), Color::Light);
        assert_eq!(board.last_move_played(), None);
    }

    #[test]
    fn en_passant_is_legal_through_the_full_game_interface() {
        let mut board =
            Chessboard::from_fen("4k3/2p5/8/3P4/8/8/8/4K3 b - - 0 1").expect("fen parses");
        let double = Move::new(bb("c7"), bb("c5"), PieceKind::Pawn, Color::Dark);
        assert!(board.execute_move(&double, true));

        let capture = Move::new(bb("d5"), bb("c6"), PieceKind::Pawn, Color::Light);
        assert!(board.validate_move(&capture));
        assert!(board.execute_move(&capture, true));
        assert_eq!(board.board_state().pieces(Color::Dark, PieceKind::Pawn), 0);
    }

    #[test]
    fn castling_through_an_attacked_square_is_rejected() {
        // The f1 rook covers f8: kingside castling is out, queenside is fine.
        let board =
            Chessboard::from_fen("r3k2r/8/8/8/8/8/8/R4RK1 b kq - 0 1").expect("fen parses");
        let targets = board.legal_move_targets(bb("e8"));
        assert_eq!(targets & bb("g8"), 0);
        assert_ne!(targets & bb("c8"), 0);
    }

    #[test]
    fn back_rank_mate_is_reported_for_light() {
        let mut board =
            Chessboard::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen parses");
        let mate = Move::new(bb("a1"), bb("a8"), PieceKind::Rook, Color::Light);
        assert!(board.execute_move(&mate, true));

        assert!(board.has_ended());
        assert_eq!(board.result(), GameResult::LightVictoryByCheckmate);
        // No further moves are accepted.
        let late = Move::new(bb("g8"), bb("h8"), PieceKind::King, Color::Dark);
        assert!(!board.execute_move(&late, true));
    }

    #[test]
    fn smothered_king_with_no_check_is_stalemate() {
        let mut board =
            Chessboard::from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").expect("fen parses");
        let quiet = Move::new(bb("f1"), bb("f7"), PieceKind::Queen, Color::Light);
        assert!(board.execute_move(&quiet, true));

        assert!(board.has_ended());
        assert_eq!(board.result(), GameResult::DrawByStalemate);
    }

    #[test]
    fn capture_into_dead_position_draws_by_insufficient_material() {
        // Bishop takes the last rook; king+knight versus king+bishop remains.
        let mut board =
            Chessboard::from_fen("4k3/8/8/8/1b6/8/3R4/4K1N1 b - - 0 1").expect("fen parses");
        let capture = Move::new(bb("b4"), bb("d2"), PieceKind::Bishop, Color::Dark);
        assert!(board.execute_move(&capture, true));

        assert!(board.has_ended());
        assert_eq!(board.result(), GameResult::DrawByInsufficientMaterial);
    }

    #[test]
    fn knight_shuttle_ends_in_threefold_repetition() {
        let mut board = Chessboard::new();
        let out_light = Move::new(bb("g1"), bb("f3"), PieceKind::Knight, Color::Light);
        let out_dark = Move::new(bb("g8"), bb("f6"), PieceKind::Knight, Color::Dark);
        let back_light = Move::new(bb("f3"), bb("g1"), PieceKind::Knight, Color::Light);
        let back_dark = Move::new(bb("f6"), bb("g8"), PieceKind::Knight, Color::Dark);

        // The position after the first knight move recurs on plies 5 and 9.
        let shuttle = [
            out_light, out_dark, back_light, back_dark,
            out_light, out_dark, back_light, back_dark,
        ];
        for mv in &shuttle {
            assert!(board.execute_move(mv, true));
            assert!(!board.has_ended());
        }

        assert!(board.execute_move(&out_light, true));
        assert!(board.has_ended());
        assert_eq!(board.result(), GameResult::DrawByThreefoldRepetition);
    }

    #[test]
    fn hundredth_quiet_halfmove_draws() {
        let mut board =
            Chessboard::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 99 60").expect("fen parses");
        let quiet = Move::new(bb("h1"), bb("h2"), PieceKind::Rook, Color::Light);
        assert!(board.execute_move(&quiet, true));

        assert_eq!(board.halfmove_clock(), 100);
        assert!(board.has_ended());
        assert_eq!(board.result(), GameResult::DrawByFiftyMoveRule);
    }

    #[test]
    fn pawn_move_resets_the_halfmove_clock() {
        let mut board =
            Chessboard::from_fen("4k3/8/8/8/8/4P3/8/4K2R w - - 99 60").expect("fen parses");
        let push = Move::new(bb("e3"), bb("e4"), PieceKind::Pawn, Color::Light);
        assert!(board.execute_move(&push, true));

        assert_eq!(board.halfmove_clock(), 0);
        assert!(!board.has_ended());
    }

    #[test]
    fn timeout_awards_the_win_to_the_opponent() {
        let mut board = Chessboard::new();
        board.raise_timeout();
        assert!(board.has_ended());
        assert_eq!(board.result(), GameResult::DarkVictoryByTimeout);
    }

    #[test]
    fn timeout_against_a_bare_king_is_a_draw() {
        // Dark flags while light has a lone king.
        let mut board =
            Chessboard::from_fen("3qk3/8/8/8/8/8/8/4K3 b - - 0 1").expect("fen parses");
        board.raise_timeout();
        assert_eq!(
            board.result(),
            GameResult::DrawByTimeoutAgainstInsufficientMaterial
        );
    }

    #[test]
    fn promotion_detection_checks_source_piece_and_target_rank() {
        let board = Chessboard::from_fen("4k3/P7/8/8/8/8/8/R3K3 w - - 0 1").expect("fen parses");
        assert!(board.is_promotion(bb("a7"), bb("a8")));
        assert!(!board.is_promotion(bb("a1"), bb("a8")));
        assert!(!board.is_promotion(bb("a7"), bb("b6")));
    }

    #[test]
    fn evaluation_tracks_material_and_terminal_results() {
        let board = Chessboard::new();
        assert_eq!(board.evaluation(), 0);

        let up_a_queen =
            Chessboard::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("fen parses");
        assert_eq!(up_a_queen.evaluation(), 9);

        let mut mated = Chessboard::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1")
            .expect("fen parses");
        let mate = Move::new(bb("a1"), bb("a8"), PieceKind::Rook, Color::Light);
        assert!(mated.execute_move(&mate, true));
        assert_eq!(mated.evaluation(), crate::game_state::chess_rules::MATE_SCORE);
    }
}
