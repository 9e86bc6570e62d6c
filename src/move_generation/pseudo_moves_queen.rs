use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::pseudo_moves_shared::{push_piece_moves, MoveKind};
use crate::moves::chess_move::ChessMove;
use crate::moves::sliding_moves::queen_attacks;

pub fn generate_queen_quiet_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    push_piece_moves(board, PieceKind::Queen, MoveKind::Quiet, queen_attacks, out);
}

pub fn generate_queen_captures(board: &BoardState, out: &mut Vec<ChessMove>) {
    push_piece_moves(board, PieceKind::Queen, MoveKind::Capture, queen_attacks, out);
}
