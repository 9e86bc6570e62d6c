//! Error types shared across the move-selection core.
//!
//! Each concern (FEN adapter, SAN tokens, move generation, engine entry
//! points) has its own enum so callers can tell a malformed input apart
//! from an internal inconsistency.

use thiserror::Error;

use crate::board_state::chess_types::{PieceKind, Square};

/// Failures raised while reading a FEN string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {field} field in FEN")]
    MissingField { field: &'static str },

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("board layout must contain 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} does not sum to 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character '{ch}' in board layout")]
    InvalidPiece { ch: char },

    #[error("invalid side-to-move field: {value}")]
    InvalidSide { value: String },

    #[error("invalid castling rights character: {ch}")]
    InvalidCastling { ch: char },

    #[error("invalid square: {value}")]
    InvalidSquare { value: String },

    #[error("invalid {field} counter: {value}")]
    InvalidCounter { field: &'static str, value: String },

    #[error("each side needs exactly one king")]
    KingCount,
}

/// Failures raised while parsing or resolving an algebraic move token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    #[error("empty move token")]
    Empty,

    #[error("token '{token}' contains characters outside the move alphabet")]
    OutsideAlphabet { token: String },

    #[error("malformed move token '{token}'")]
    Malformed { token: String },

    #[error("no {piece:?} can reach square {dest}")]
    NoSource { piece: PieceKind, dest: Square },

    #[error("no {piece:?} on explicit source square {square}")]
    EmptySource { piece: PieceKind, square: Square },

    #[error("castling rook is not on its home square")]
    CastlingRookMissing,

    #[error("side to move has no king")]
    MissingKing,

    #[error("castling right has been lost")]
    CastlingRightLost,

    #[error("pieces stand between king and rook")]
    CastlingPathBlocked,

    #[error("king is in check or would cross an attacked square")]
    CastlingThroughCheck,
}

/// Failures raised by generation, application and search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    #[error("no piece on from-square {square}")]
    EmptyFromSquare { square: Square },

    #[error("invalid board state: {message}")]
    InvalidState { message: String },

    #[error(transparent)]
    Token(#[from] SanError),
}

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

/// Failures surfaced to engine callers and the command-line front end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no candidate moves to choose from")]
    NoCandidates,

    #[error("none of the {count} candidate tokens resolves on this board")]
    NoResolvableCandidates { count: usize },

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
}
