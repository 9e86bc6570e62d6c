//! Pseudo-legal generation entry points and the generator seam used by search.
//!
//! Quiet moves and captures are produced by independent pipelines, one per
//! piece type, so quiescence can ask for captures alone.

use crate::board_state::board_state::BoardState;
use crate::chess_errors::MoveGenResult;
use crate::move_generation::pseudo_moves_bishop::{generate_bishop_captures, generate_bishop_quiet_moves};
use crate::move_generation::pseudo_moves_king::{generate_king_captures, generate_king_quiet_moves};
use crate::move_generation::pseudo_moves_knight::{generate_knight_captures, generate_knight_quiet_moves};
use crate::move_generation::pseudo_moves_pawn::{generate_pawn_captures, generate_pawn_quiet_moves};
use crate::move_generation::pseudo_moves_queen::{generate_queen_captures, generate_queen_quiet_moves};
use crate::move_generation::pseudo_moves_rook::{generate_rook_captures, generate_rook_quiet_moves};
use crate::moves::chess_move::ChessMove;

type PieceGenerator = fn(&BoardState, &mut Vec<ChessMove>);

const QUIET_GENERATORS: [PieceGenerator; 6] = [
    generate_pawn_quiet_moves,
    generate_knight_quiet_moves,
    generate_bishop_quiet_moves,
    generate_rook_quiet_moves,
    generate_queen_quiet_moves,
    generate_king_quiet_moves,
];

const CAPTURE_GENERATORS: [PieceGenerator; 6] = [
    generate_pawn_captures,
    generate_knight_captures,
    generate_bishop_captures,
    generate_rook_captures,
    generate_queen_captures,
    generate_king_captures,
];

pub fn generate_quiet_moves(board: &BoardState) -> Vec<ChessMove> {
    let mut out = Vec::with_capacity(48);
    for generate in QUIET_GENERATORS {
        generate(board, &mut out);
    }
    out
}

pub fn generate_captures(board: &BoardState) -> Vec<ChessMove> {
    let mut out = Vec::with_capacity(16);
    for generate in CAPTURE_GENERATORS {
        generate(board, &mut out);
    }
    out
}

/// Captures first, then quiet moves.
pub fn generate_pseudo_legal_moves(board: &BoardState) -> Vec<ChessMove> {
    let mut out = generate_captures(board);
    out.extend(generate_quiet_moves(board));
    out
}

/// Legal move source consumed by perft and search.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, board: &BoardState) -> MoveGenResult<Vec<ChessMove>>;

    fn generate_legal_captures(&self, board: &BoardState) -> MoveGenResult<Vec<ChessMove>>;
}
