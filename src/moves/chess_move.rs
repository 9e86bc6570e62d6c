//! Structured move record produced by generation and consumed by search.
//!
//! Text tokens only exist at the outer boundary (see `san`); everything in
//! between passes `ChessMove` values around.

use crate::board_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub type MoveFlags = u8;
pub const FLAG_CAPTURE: MoveFlags = 1 << 0;
pub const FLAG_EN_PASSANT: MoveFlags = 1 << 1;
pub const FLAG_CASTLE_KINGSIDE: MoveFlags = 1 << 2;
pub const FLAG_CASTLE_QUEENSIDE: MoveFlags = 1 << 3;
pub const FLAG_DOUBLE_PAWN_PUSH: MoveFlags = 1 << 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl ChessMove {
    #[inline]
    pub const fn new(piece: PieceKind, from: Square, to: Square, flags: MoveFlags) -> Self {
        Self {
            piece,
            from,
            to,
            promotion: None,
            flags,
        }
    }

    #[inline]
    pub fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.flags & (FLAG_CASTLE_KINGSIDE | FLAG_CASTLE_QUEENSIDE) != 0
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    /// Coordinate form such as `e2e4` or `e7e8q`, used in log output.
    pub fn to_coordinate(&self) -> String {
        let mut out = square_to_algebraic(self.from);
        out.push_str(&square_to_algebraic(self.to));
        if let Some(promo) = self.promotion.and_then(PieceKind::san_letter) {
            out.push(promo.to_ascii_lowercase());
        }
        out
    }
}
