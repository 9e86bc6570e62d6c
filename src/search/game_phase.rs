//! Coarse game-phase classification driving the evaluator's weight table.

use crate::board_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

/// Thresholds used by [`detect_phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDetection {
    /// Last fullmove number still considered part of the opening.
    pub opening_fullmove_limit: u16,
    /// Non-king pieces (both sides together) at or below which the game is an endgame.
    pub endgame_piece_threshold: u32,
}

impl Default for PhaseDetection {
    fn default() -> Self {
        Self {
            opening_fullmove_limit: 12,
            endgame_piece_threshold: 12,
        }
    }
}

/// Endgame wins over opening when both apply: a thin board is scored as an
/// endgame even on move 5.
pub fn detect_phase(board: &BoardState, detection: &PhaseDetection) -> GamePhase {
    let material = board.non_king_count(Color::Light) + board.non_king_count(Color::Dark);
    if material <= detection.endgame_piece_threshold {
        return GamePhase::Endgame;
    }

    if board.fullmove_number <= detection.opening_fullmove_limit
        && king_near_home(board, Color::Light)
        && king_near_home(board, Color::Dark)
    {
        GamePhase::Opening
    } else {
        GamePhase::Middlegame
    }
}

/// King still on its back rank, at most one file from e.
fn king_near_home(board: &BoardState, color: Color) -> bool {
    match board.king_square(color) {
        Some(square) => rank_of(square) == color.home_rank() && file_of(square).abs_diff(4) <= 1,
        None => false,
    }
}
