//! King steps and castling.

use crate::board_state::chess_rules::{castle_geometry, CastleSide};
use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::chess_errors::SanError;
use crate::move_generation::attack_detector::is_square_attacked;
use crate::move_generation::pseudo_moves_shared::{push_piece_moves, MoveKind};
use crate::moves::chess_move::{ChessMove, FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE};
use crate::moves::step_moves::king_targets;

pub fn generate_king_quiet_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    push_piece_moves(board, PieceKind::King, MoveKind::Quiet, |sq, _| king_targets(sq), out);
    generate_castling_moves(board, out);
}

pub fn generate_king_captures(board: &BoardState, out: &mut Vec<ChessMove>) {
    push_piece_moves(board, PieceKind::King, MoveKind::Capture, |sq, _| king_targets(sq), out);
}

fn generate_castling_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if let Ok(mv) = castling_move(board, side) {
            out.push(mv);
        }
    }
}

/// Castling needs the king and rook at home, the right, an empty path, and a
/// king that is not in check and does not cross or land on an attacked square.
pub fn castling_move(board: &BoardState, castle_side: CastleSide) -> Result<ChessMove, SanError> {
    let side = board.side_to_move;
    let geometry = castle_geometry(side, castle_side);

    if board.bitboard(side, PieceKind::King) & square_mask(geometry.king_from) == 0 {
        return Err(SanError::MissingKing);
    }
    if board.bitboard(side, PieceKind::Rook) & square_mask(geometry.rook_from) == 0 {
        return Err(SanError::CastlingRookMissing);
    }
    if board.castling_rights & geometry.right == 0 {
        return Err(SanError::CastlingRightLost);
    }
    if board.occupied() & geometry.must_be_empty != 0 {
        return Err(SanError::CastlingPathBlocked);
    }
    if geometry
        .king_path
        .iter()
        .any(|&sq| is_square_attacked(board, sq, side.opposite()))
    {
        return Err(SanError::CastlingThroughCheck);
    }

    let flag = match castle_side {
        CastleSide::Kingside => FLAG_CASTLE_KINGSIDE,
        CastleSide::Queenside => FLAG_CASTLE_QUEENSIDE,
    };
    Ok(ChessMove::new(PieceKind::King, geometry.king_from, geometry.king_to, flag))
}
