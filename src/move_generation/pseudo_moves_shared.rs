//! Helpers shared by the per-piece generators.
//!
//! Every generator walks the set bits of its own piece bitboard, so output is
//! bounded by the number of pieces of that type actually on the board.

use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::moves::chess_move::{ChessMove, FLAG_CAPTURE};

/// Which half of a generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    Capture,
}

impl MoveKind {
    /// Destination mask for this half: empty squares or enemy-held squares.
    #[inline]
    pub fn targets(self, board: &BoardState) -> u64 {
        match self {
            MoveKind::Quiet => !board.occupied(),
            MoveKind::Capture => board.occupancy(board.side_to_move.opposite()),
        }
    }

    #[inline]
    pub const fn flags(self) -> u8 {
        match self {
            MoveKind::Quiet => 0,
            MoveKind::Capture => FLAG_CAPTURE,
        }
    }
}

/// Push one move per target square for every `kind` piece of the side to move.
pub fn push_piece_moves(
    board: &BoardState,
    kind: PieceKind,
    move_kind: MoveKind,
    attacks: impl Fn(Square, u64) -> u64,
    out: &mut Vec<ChessMove>,
) {
    let side = board.side_to_move;
    let occupied = board.occupied();
    let targets = move_kind.targets(board);

    for from in squares_of(board.bitboard(side, kind)) {
        for to in squares_of(attacks(from, occupied) & targets) {
            out.push(ChessMove::new(kind, from, to, move_kind.flags()));
        }
    }
}
