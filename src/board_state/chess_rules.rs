//! Canonical chess-rule constants.
//!
//! Starting position, castling geometry and the move-token alphabet live here
//! so generation, resolution and the FEN adapter agree on them.

use crate::board_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Characters a move token may contain. `0` is accepted as a castling digit.
pub const MOVE_TOKEN_ALPHABET: &str = "KQRBNabcdefgh12345678x+#-O0=";

/// Pieces a pawn may promote to in generated move tokens.
pub const PROMOTION_PIECES: [PieceKind; 2] = [PieceKind::Queen, PieceKind::Knight];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Fixed squares touched by one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty between king and rook.
    pub must_be_empty: u64,
    /// Squares the king stands on, crosses or lands on.
    pub king_path: [Square; 3],
}

pub const fn castle_geometry(color: Color, side: CastleSide) -> CastleGeometry {
    let home = color.home_rank();
    let king_from = square_at(4, home);
    match side {
        CastleSide::Kingside => CastleGeometry {
            right: match color {
                Color::Light => CASTLE_LIGHT_KINGSIDE,
                Color::Dark => CASTLE_DARK_KINGSIDE,
            },
            king_from,
            king_to: square_at(6, home),
            rook_from: square_at(7, home),
            rook_to: square_at(5, home),
            must_be_empty: square_mask(square_at(5, home)) | square_mask(square_at(6, home)),
            king_path: [king_from, square_at(5, home), square_at(6, home)],
        },
        CastleSide::Queenside => CastleGeometry {
            right: match color {
                Color::Light => CASTLE_LIGHT_QUEENSIDE,
                Color::Dark => CASTLE_DARK_QUEENSIDE,
            },
            king_from,
            king_to: square_at(2, home),
            rook_from: square_at(0, home),
            rook_to: square_at(3, home),
            must_be_empty: square_mask(square_at(1, home))
                | square_mask(square_at(2, home))
                | square_mask(square_at(3, home)),
            king_path: [king_from, square_at(3, home), square_at(2, home)],
        },
    }
}

/// Castling right lost when a rook leaves or is captured on `square`.
pub const fn rook_home_right(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_LIGHT_QUEENSIDE,
        7 => CASTLE_LIGHT_KINGSIDE,
        56 => CASTLE_DARK_QUEENSIDE,
        63 => CASTLE_DARK_KINGSIDE,
        _ => 0,
    }
}
