//! Structured move to algebraic token, for the textual boundary.

use crate::board_state::chess_rules::CastleSide;
use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::chess_errors::MoveGenResult;
use crate::move_generation::attack_detector::attackers_count;
use crate::move_generation::move_apply::play_move;
use crate::moves::chess_move::{ChessMove, FLAG_CASTLE_KINGSIDE};
use crate::san::san_resolver::candidate_sources;
use crate::san::san_token::{SanMove, SanToken};

/// Token for `mv` on `board`, disambiguated just enough for the resolver to
/// find `mv.from` again, with `+` or `++` appended for check and double check.
pub fn move_to_san(board: &BoardState, mv: &ChessMove) -> MoveGenResult<String> {
    Ok(move_to_token(board, mv)?.to_string())
}

pub fn move_to_token(board: &BoardState, mv: &ChessMove) -> MoveGenResult<SanToken> {
    let san_move = if mv.is_castle() {
        SanMove::Castle(if mv.flags & FLAG_CASTLE_KINGSIDE != 0 {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        })
    } else {
        let (from_file, from_rank) = disambiguation(board, mv);
        SanMove::Piece {
            piece: mv.piece,
            from_file,
            from_rank,
            capture: mv.is_capture(),
            dest: mv.to,
            promotion: mv.promotion,
        }
    };

    Ok(SanToken {
        mv: san_move,
        check_marks: check_marks(board, mv)?,
    })
}

fn disambiguation(board: &BoardState, mv: &ChessMove) -> (Option<u8>, Option<u8>) {
    if mv.piece == PieceKind::Pawn {
        return (mv.is_capture().then_some(file_of(mv.from)), None);
    }

    let rivals: Vec<Square> = candidate_sources(board, board.side_to_move, mv.piece, mv.to, mv.is_capture())
        .into_iter()
        .filter(|&sq| sq != mv.from)
        .collect();

    if rivals.is_empty() {
        (None, None)
    } else if rivals.iter().all(|&sq| file_of(sq) != file_of(mv.from)) {
        (Some(file_of(mv.from)), None)
    } else if rivals.iter().all(|&sq| rank_of(sq) != rank_of(mv.from)) {
        (None, Some(rank_of(mv.from)))
    } else {
        (Some(file_of(mv.from)), Some(rank_of(mv.from)))
    }
}

fn check_marks(board: &BoardState, mv: &ChessMove) -> MoveGenResult<u8> {
    let next = play_move(board, mv)?;
    let Some(king) = next.king_square(next.side_to_move) else {
        return Ok(0);
    };
    Ok(attackers_count(&next, king, board.side_to_move).min(2) as u8)
}
