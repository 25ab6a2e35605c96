//! Core value types shared by the board, the game state machine, and search.

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }
}

/// Piece kind (color is represented separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// Board square index (`0..=63`, a1 = 0, h8 = 63).
pub type Square = u8;

/// Compact castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;

/// Final (or pending) classification of a game.
///
/// A timeout against a side that could never mate is a draw, not a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    DrawByInsufficientMaterial,
    DrawByThreefoldRepetition,
    DrawByFiftyMoveRule,
    DrawByStalemate,
    LightVictoryByCheckmate,
    DarkVictoryByCheckmate,
    LightVictoryByTimeout,
    DarkVictoryByTimeout,
    DrawByTimeoutAgainstInsufficientMaterial,
}

impl GameResult {
    /// True for every variant except `InProgress`.
    #[inline]
    pub fn is_decided(self) -> bool {
        self != GameResult::InProgress
    }
}
