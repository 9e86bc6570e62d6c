//! Applying a structured move to a board.
//!
//! `apply_move` mutates in place and leaves the side to move unchanged, so a
//! caller can ask whether the mover's own king is attacked straight after.
//! `play_move` copies, applies and hands the turn over.

use crate::board_state::chess_rules::{castle_geometry, rook_home_right, CastleSide};
use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::chess_errors::{MoveGenResult, MoveGenerationError};
use crate::moves::chess_move::{ChessMove, FLAG_CASTLE_KINGSIDE};

pub fn apply_move(board: &mut BoardState, mv: &ChessMove) -> MoveGenResult<()> {
    let mover = board.side_to_move;
    if board.bitboard(mover, mv.piece) & square_mask(mv.from) == 0 {
        return Err(MoveGenerationError::EmptyFromSquare { square: mv.from });
    }

    let captured = !board.is_empty_square(mv.to) || mv.is_en_passant();

    board.clear_piece(mover, mv.piece, mv.from);
    board.clear_square(mv.to);

    if mv.is_en_passant() {
        let victim = offset_square(mv.to, 0, -mover.pawn_direction()).ok_or_else(|| {
            MoveGenerationError::InvalidState {
                message: format!("en-passant target {} has no victim square", mv.to),
            }
        })?;
        board.clear_piece(mover.opposite(), PieceKind::Pawn, victim);
    }

    board.set_piece(mover, mv.promotion.unwrap_or(mv.piece), mv.to);

    if mv.is_castle() {
        let side = if mv.flags & FLAG_CASTLE_KINGSIDE != 0 {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        };
        let geometry = castle_geometry(mover, side);
        board.clear_piece(mover, PieceKind::Rook, geometry.rook_from);
        board.set_piece(mover, PieceKind::Rook, geometry.rook_to);
    }

    if mv.piece == PieceKind::King {
        board.castling_rights &= !(castle_geometry(mover, CastleSide::Kingside).right
            | castle_geometry(mover, CastleSide::Queenside).right);
    }
    board.castling_rights &= !(rook_home_right(mv.from) | rook_home_right(mv.to));

    board.en_passant_square = if mv.is_double_pawn_push() {
        offset_square(mv.from, 0, mover.pawn_direction())
    } else {
        None
    };

    if mv.piece == PieceKind::Pawn || captured {
        board.halfmove_clock = 0;
    } else {
        board.halfmove_clock = board.halfmove_clock.saturating_add(1);
    }

    Ok(())
}

/// Copy `board`, apply `mv` and pass the turn.
pub fn play_move(board: &BoardState, mv: &ChessMove) -> MoveGenResult<BoardState> {
    let mut next = *board;
    apply_move(&mut next, mv)?;
    next.pass_turn();
    Ok(next)
}
