//! FEN-to-BoardState parser.
//!
//! Malformed input is reported as a [`FenError`] and never partially applied.

use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::chess_errors::FenError;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<BoardState, FenError> {
    let mut parts = fen.split_whitespace();
    let mut next_field = |field: &'static str| parts.next().ok_or(FenError::MissingField { field });

    let board_part = next_field("board")?;
    let side_part = next_field("side-to-move")?;
    let castling_part = next_field("castling")?;
    let en_passant_part = next_field("en-passant")?;
    let halfmove_part = next_field("halfmove")?;
    let fullmove_part = next_field("fullmove")?;

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut board = BoardState::new_empty();
    parse_board(board_part, &mut board)?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_square = parse_en_passant_square(en_passant_part)?;
    board.halfmove_clock = parse_counter("halfmove", halfmove_part)?;
    board.fullmove_number = parse_counter("fullmove", fullmove_part)?;

    for color in [Color::Light, Color::Dark] {
        if board.bitboard(color, PieceKind::King).count_ones() != 1 {
            return Err(FenError::KingCount);
        }
    }

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut BoardState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FenError::InvalidPiece { ch });
                }
                file = match file.checked_add(run as u8) {
                    Some(next) if next <= 8 => next,
                    _ => return Err(FenError::RankWidth { rank: usize::from(rank) + 1 }),
                };
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch).ok_or(FenError::InvalidPiece { ch })?;
            if file >= 8 {
                return Err(FenError::RankWidth { rank: usize::from(rank) + 1 });
            }
            board.set_piece(color, kind, square_at(file, rank));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankWidth { rank: usize::from(rank) + 1 });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::InvalidSide { value: side_part.to_owned() }),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(0);
    }

    castling_part.chars().try_fold(0, |rights, ch| {
        let bit = match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling { ch }),
        };
        Ok(rights | bit)
    })
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part)
        .map(Some)
        .ok_or_else(|| FenError::InvalidSquare { value: en_passant_part.to_owned() })
}

fn parse_counter(field: &'static str, value: &str) -> Result<u16, FenError> {
    value.parse::<u16>().map_err(|_| FenError::InvalidCounter {
        field,
        value: value.to_owned(),
    })
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}
