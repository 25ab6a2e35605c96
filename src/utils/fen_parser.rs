//! FEN-to-board parser.
//!
//! Builds a populated `BoardState` plus the game-level counters from a
//! Forsyth-Edwards Notation string. All six fields are required and
//! validated strictly.

use crate::errors::ChessError;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{
    CastlingRights, Color, PieceKind, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE,
    CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE,
};
use crate::utils::algebraic::algebraic_to_bitboard;

/// Everything a FEN string describes: the board plus the game counters the
/// board itself does not track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFen {
    pub board_state: BoardState,
    pub side_to_move: Color,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

pub fn parse_fen(fen: &str) -> Result<ParsedFen, ChessError> {
    let invalid = || ChessError::InvalidFenString(fen.to_owned());

    let mut parts = fen.split_whitespace();
    let board_part = parts.next().ok_or_else(invalid)?;
    let side_part = parts.next().ok_or_else(invalid)?;
    let castling_part = parts.next().ok_or_else(invalid)?;
    let en_passant_part = parts.next().ok_or_else(invalid)?;
    let halfmove_part = parts.next().ok_or_else(invalid)?;
    let fullmove_part = parts.next().ok_or_else(invalid)?;

    if parts.next().is_some() {
        return Err(invalid());
    }

    let mut board_state = BoardState::empty();
    parse_board(board_part, &mut board_state)?;
    board_state.set_castling_rights(parse_castling_rights(castling_part)?);
    board_state.set_en_passant_square(parse_en_passant_square(en_passant_part)?);

    let side_to_move = match side_part {
        "w" => Color::Light,
        "b" => Color::Dark,
        _ => return Err(invalid()),
    };
    let halfmove_clock = halfmove_part.parse::<u16>().map_err(|_| invalid())?;
    let fullmove_number = fullmove_part.parse::<u16>().map_err(|_| invalid())?;

    Ok(ParsedFen {
        board_state,
        side_to_move,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_board(board_part: &str, board_state: &mut BoardState) -> Result<(), ChessError> {
    let invalid = || ChessError::InvalidFenString(board_part.to_owned());

    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid());
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid());
                }
                file += empty_count as usize;
                continue;
            }

            let (color, piece) =
                piece_from_fen_char(ch).ok_or(ChessError::InvalidFenToken(ch))?;

            if file >= 8 {
                return Err(invalid());
            }

            let sq = board_rank * 8 + file;
            board_state.add_piece(color, piece, 1u64 << sq);
            file += 1;
        }

        if file != 8 {
            return Err(invalid());
        }
    }

    Ok(())
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(ChessError::InvalidFenToken(ch)),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<u64, ChessError> {
    if en_passant_part == "-" {
        return Ok(0);
    }
    algebraic_to_bitboard(en_passant_part)
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}
