//! Engine abstraction used by the command-line front end.
//!
//! Defines the request and response payloads so move-selection strategies
//! can be swapped behind a single trait.

use crate::board_state::board_state::BoardState;
use crate::chess_errors::EngineError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Explicit search depth; overrides `timeout`.
    pub depth: Option<u8>,
    /// Time budget in seconds, mapped to a depth by the engine.
    pub timeout: Option<u64>,
    /// Candidate move tokens to choose between. `None` means every legal move.
    pub candidate_moves: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// 0-based index into the candidate list (or the generated legal moves).
    pub best_index: Option<usize>,
    /// Token of the chosen move.
    pub best_move: Option<String>,
    pub score: i32,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn choose_move(&mut self, board: &BoardState, params: &GoParams) -> Result<EngineOutput, EngineError>;
}
