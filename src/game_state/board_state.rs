//! Raw board representation and move application.
//!
//! `BoardState` owns the twelve piece bitboards, the castling rights, and the
//! en-passant window. It knows per-piece movement rules and how to apply a
//! move's side effects, but has no concept of turn order or game
//! termination; that lives in `Chessboard`.

use rand::seq::SliceRandom;

use crate::errors::ChessError;
use crate::game_state::chess_rules::{
    INSUFFICIENT_MATERIAL_THRESHOLD, MATERIAL_VALUES, PROMOTION_RANKS,
};
use crate::game_state::chess_types::{
    CastlingRights, Color, PieceKind, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE,
    CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE,
};
use crate::moves::bishop_moves::bishop_targets;
use crate::moves::chess_move::Move;
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::pawn_moves::pawn_targets;
use crate::moves::queen_moves::queen_targets;
use crate::moves::rook_moves::rook_targets;

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Piece-group enumeration order used by the search's move ordering.
const SEARCH_GROUP_ORDER: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::King,
];

/// Promotion choices in enumeration order (also the UI-facing order).
pub const PROMOTION_ORDER: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Iterate the one-hot positions of a mask, lowest bit first.
pub fn split_positions(mut mask: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let pos = mask & mask.wrapping_neg();
        mask &= mask - 1;
        Some(pos)
    })
}

/// Hashable identity of a position for repetition counting: full occupancy,
/// en-passant window, castling rights, and the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pieces: [[u64; 6]; 2],
    en_passant_square: u64,
    castling_rights: CastlingRights,
    to_move: Color,
}

/// A single board state: piece placement plus the move-dependent flags.
///
/// Copied wholesale when a caller wants to explore a hypothetical
/// continuation; there is no incremental undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    // One-hot square a pawn may capture onto en passant, or 0.
    en_passant_square: u64,
    castling_rights: CastlingRights,
}

impl BoardState {
    /// An empty board with no rights; used by the FEN parser.
    pub(crate) fn empty() -> Self {
        BoardState {
            pieces: [[0; 6]; 2],
            en_passant_square: 0,
            castling_rights: 0,
        }
    }

    /// Parse the placement, castling, and en-passant fields of a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Ok(crate::utils::fen_parser::parse_fen(fen)?.board_state)
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn en_passant_square(&self) -> u64 {
        self.en_passant_square
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub(crate) fn set_en_passant_square(&mut self, square: u64) {
        self.en_passant_square = square;
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights;
    }

    /// All squares occupied by `color`.
    #[inline]
    pub fn occupied(&self, color: Color) -> u64 {
        self.pieces[color.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb)
    }

    /// All occupied squares of either color.
    #[inline]
    pub fn occupied_all(&self) -> u64 {
        self.occupied(Color::Light) | self.occupied(Color::Dark)
    }

    /// The piece occupying the one-hot `pos`, if any.
    pub fn piece_at(&self, pos: u64) -> Option<(Color, PieceKind)> {
        for color in [Color::Light, Color::Dark] {
            for kind in ALL_PIECE_KINDS {
                if self.pieces[color.index()][kind.index()] & pos != 0 {
                    return Some((color, kind));
                }
            }
        }
        None
    }

    /// Pseudo-legal destination mask for the piece on the one-hot `pos`.
    ///
    /// Empty squares yield an empty mask. Self-check is not considered.
    pub fn pseudo_legal_targets(&self, pos: u64) -> u64 {
        match self.piece_at(pos) {
            Some((color, PieceKind::Pawn)) => pawn_targets(self, pos, color),
            Some((color, PieceKind::Knight)) => knight_targets(self, pos, color),
            Some((color, PieceKind::Bishop)) => bishop_targets(self, pos, color),
            Some((color, PieceKind::Rook)) => rook_targets(self, pos, color),
            Some((color, PieceKind::Queen)) => queen_targets(self, pos, color),
            Some((color, PieceKind::King)) => king_targets(self, pos, color, true),
            None => 0,
        }
    }

    /// Expand the destination mask of the piece on `pos` into `Move` values.
    ///
    /// A pawn whose targets touch a back rank expands each destination into
    /// the four promotion choices, queen first.
    pub fn moves_from(&self, pos: u64) -> Vec<Move> {
        let Some((color, piece)) = self.piece_at(pos) else {
            return Vec::new();
        };
        let targets = self.pseudo_legal_targets(pos);
        let mut moves = Vec::new();

        if piece != PieceKind::Pawn || targets & PROMOTION_RANKS == 0 {
            for dst in split_positions(targets) {
                moves.push(Move::new(pos, dst, piece, color));
            }
        } else {
            for dst in split_positions(targets) {
                for promotion in PROMOTION_ORDER {
                    moves.push(Move::promoting(pos, dst, color, promotion));
                }
            }
        }

        moves
    }

    /// Every pseudo-legal move for `color`, grouped by piece type with each
    /// square's moves shuffled. Search relies on this ordering: randomized on
    /// purpose, not a strength heuristic.
    pub fn all_pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut rng = rand::rng();
        let mut moves = Vec::new();

        for kind in SEARCH_GROUP_ORDER {
            for pos in split_positions(self.pieces(color, kind)) {
                let mut group = self.moves_from(pos);
                group.shuffle(&mut rng);
                moves.extend(group);
            }
        }

        moves
    }

    /// Union of pseudo-legal destinations of every piece of `color`.
    ///
    /// King contributions skip castling so this can be called from inside
    /// the castling-legality check itself.
    pub fn attacked_squares(&self, color: Color) -> u64 {
        let mut attacked = 0u64;

        for pos in split_positions(self.pieces(color, PieceKind::Pawn)) {
            attacked |= pawn_targets(self, pos, color);
        }
        for pos in split_positions(self.pieces(color, PieceKind::Knight)) {
            attacked |= knight_targets(self, pos, color);
        }
        for pos in split_positions(self.pieces(color, PieceKind::Bishop)) {
            attacked |= bishop_targets(self, pos, color);
        }
        for pos in split_positions(self.pieces(color, PieceKind::Rook)) {
            attacked |= rook_targets(self, pos, color);
        }
        for pos in split_positions(self.pieces(color, PieceKind::Queen)) {
            attacked |= queen_targets(self, pos, color);
        }
        for pos in split_positions(self.pieces(color, PieceKind::King)) {
            attacked |= king_targets(self, pos, color, false);
        }

        attacked
    }

    /// True iff the king of `color` stands on a square the opponent attacks.
    pub fn king_in_check(&self, color: Color) -> bool {
        self.pieces(color, PieceKind::King) & self.attacked_squares(color.opposite()) != 0
    }

    /// Material sum for `color`: pawn 1, minor 3, rook 5, queen 9.
    pub fn material_count(&self, color: Color) -> u32 {
        MATERIAL_VALUES
            .iter()
            .zip(ALL_PIECE_KINDS)
            .map(|(value, kind)| self.pieces(color, kind).count_ones() * value)
            .sum()
    }

    /// Threshold heuristic: under 4 material and no pawns cannot force mate.
    pub fn has_insufficient_material(&self, color: Color) -> bool {
        self.material_count(color) < INSUFFICIENT_MATERIAL_THRESHOLD
            && self.pieces(color, PieceKind::Pawn) == 0
    }

    /// True if the move is a pawn move or lands on an occupied square.
    /// Evaluated against the pre-move state; feeds the half-move clock.
    pub fn is_pawn_or_capture(&self, mv: &Move) -> bool {
        mv.piece == PieceKind::Pawn || mv.dst & self.occupied_all() != 0
    }

    /// Repetition identity of this position with `to_move` on turn.
    pub fn position_key(&self, to_move: Color) -> PositionKey {
        PositionKey {
            pieces: self.pieces,
            en_passant_square: self.en_passant_square,
            castling_rights: self.castling_rights,
            to_move,
        }
    }

    /// Apply `mv` to this board in place.
    ///
    /// With `pseudo_legality_check` set, a destination outside the source
    /// square's current pseudo-legal mask returns `false` and leaves the
    /// state untouched. Once mutation starts the move always completes:
    /// capture removal (including the en-passant victim, which is not on the
    /// destination square), the castling rook's companion move, promotion
    /// piece swap, en-passant window install/clear, and castling-rights
    /// revocation.
    pub fn push_move(&mut self, mv: &Move, pseudo_legality_check: bool) -> bool {
        if pseudo_legality_check && mv.dst & self.pseudo_legal_targets(mv.src) == 0 {
            return false;
        }

        let src_idx = mv.src.trailing_zeros() as i32;
        let dst_idx = mv.dst.trailing_zeros() as i32;

        // A capture landing on a rook origin square revokes that right.
        match dst_idx {
            0 => self.castling_rights &= !CASTLE_LIGHT_QUEENSIDE,
            7 => self.castling_rights &= !CASTLE_LIGHT_KINGSIDE,
            56 => self.castling_rights &= !CASTLE_DARK_QUEENSIDE,
            63 => self.castling_rights &= !CASTLE_DARK_KINGSIDE,
            _ => {}
        }

        let mut en_passant_installed = false;

        if mv.piece == PieceKind::Pawn {
            let mut capture_square = mv.dst;
            match mv.color {
                Color::Light => {
                    if dst_idx - src_idx == 16 {
                        self.en_passant_square = mv.dst >> 8;
                        en_passant_installed = true;
                    } else if (dst_idx - src_idx == 7 || dst_idx - src_idx == 9)
                        && self.en_passant_square == mv.dst
                    {
                        capture_square = mv.dst >> 8;
                    }
                }
                Color::Dark => {
                    if dst_idx - src_idx == -16 {
                        self.en_passant_square = mv.dst << 8;
                        en_passant_installed = true;
                    } else if (dst_idx - src_idx == -7 || dst_idx - src_idx == -9)
                        && self.en_passant_square == mv.dst
                    {
                        capture_square = mv.dst << 8;
                    }
                }
            }
            self.delete_piece(capture_square);

            let promotion_rank = match mv.color {
                Color::Light => 7,
                Color::Dark => 0,
            };
            if dst_idx / 8 == promotion_rank {
                self.delete_piece(mv.src);
                self.add_piece(mv.color, mv.promotion.unwrap_or(PieceKind::Queen), mv.dst);
            } else {
                self.move_piece(mv.src, mv.dst);
            }
        } else {
            self.delete_piece(mv.dst);
            self.move_piece(mv.src, mv.dst);
        }

        if !en_passant_installed {
            self.en_passant_square = 0;
        }

        match (mv.piece, mv.color) {
            (PieceKind::King, Color::Light) => {
                if src_idx == 4 && dst_idx == 6 {
                    self.move_piece(1u64 << 7, 1u64 << 5);
                } else if src_idx == 4 && dst_idx == 2 {
                    self.move_piece(1u64, 1u64 << 3);
                }
                self.castling_rights &= !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE);
            }
            (PieceKind::King, Color::Dark) => {
                if src_idx == 60 && dst_idx == 62 {
                    self.move_piece(1u64 << 63, 1u64 << 61);
                } else if src_idx == 60 && dst_idx == 58 {
                    self.move_piece(1u64 << 56, 1u64 << 59);
                }
                self.castling_rights &= !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
            }
            (PieceKind::Rook, Color::Light) => match src_idx {
                7 => self.castling_rights &= !CASTLE_LIGHT_KINGSIDE,
                0 => self.castling_rights &= !CASTLE_LIGHT_QUEENSIDE,
                _ => {}
            },
            (PieceKind::Rook, Color::Dark) => match src_idx {
                63 => self.castling_rights &= !CASTLE_DARK_KINGSIDE,
                56 => self.castling_rights &= !CASTLE_DARK_QUEENSIDE,
                _ => {}
            },
            _ => {}
        }

        true
    }

    pub(crate) fn add_piece(&mut self, color: Color, kind: PieceKind, pos: u64) {
        self.pieces[color.index()][kind.index()] |= pos;
    }

    fn delete_piece(&mut self, pos: u64) {
        for side in self.pieces.iter_mut() {
            for bb in side.iter_mut() {
                *bb &= !pos;
            }
        }
    }

    fn move_piece(&mut self, src: u64, dst: u64) {
        if let Some((color, kind)) = self.piece_at(src) {
            self.delete_piece(src);
            self.add_piece(color, kind, dst);
        }
    }
}
