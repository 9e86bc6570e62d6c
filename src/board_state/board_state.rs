//! Bitboard position record.
//!
//! `BoardState` holds the 12 piece bitboards plus turn, castling, en-passant
//! and clock fields. It is a plain `Copy` value: search and legality testing
//! copy it before a trial move and drop the copy afterward, so no instance is
//! ever shared between branches.

use crate::board_state::chess_types::*;
use crate::chess_errors::FenError;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl BoardState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        const RANK_1: u64 = 0xFF;
        const RANK_2: u64 = RANK_1 << 8;
        const RANK_7: u64 = RANK_1 << 48;
        const RANK_8: u64 = RANK_1 << 56;

        let back_rank = |kind: PieceKind| -> u64 {
            match kind {
                PieceKind::Pawn => 0,
                PieceKind::Knight => 0b0100_0010,
                PieceKind::Bishop => 0b0010_0100,
                PieceKind::Rook => 0b1000_0001,
                PieceKind::Queen => 0b0000_1000,
                PieceKind::King => 0b0001_0000,
            }
        };

        let mut board = Self {
            castling_rights: CASTLE_ALL,
            ..Self::default()
        };
        for kind in ALL_PIECE_KINDS {
            let light = back_rank(kind) & RANK_1;
            board.pieces[Color::Light.index()][kind.index()] = light;
            board.pieces[Color::Dark.index()][kind.index()] = (light << 56) & RANK_8;
        }
        board.pieces[Color::Light.index()][PieceKind::Pawn.index()] = RANK_2;
        board.pieces[Color::Dark.index()][PieceKind::Pawn.index()] = RANK_7;
        board
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn set_piece(&mut self, color: Color, kind: PieceKind, square: Square) {
        self.pieces[color.index()][kind.index()] |= square_mask(square);
    }

    #[inline]
    pub fn clear_piece(&mut self, color: Color, kind: PieceKind, square: Square) {
        self.pieces[color.index()][kind.index()] &= !square_mask(square);
    }

    /// Remove whatever stands on `square`, across all 12 bitboards.
    #[inline]
    pub fn clear_square(&mut self, square: Square) {
        let keep = !square_mask(square);
        for side in self.pieces.iter_mut() {
            for bitboard in side.iter_mut() {
                *bitboard &= keep;
            }
        }
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.pieces[color.index()]
            .iter()
            .fold(0u64, |acc, bitboard| acc | bitboard)
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupancy(Color::Light) | self.occupancy(Color::Dark)
    }

    #[inline]
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.occupied() & square_mask(square) == 0
    }

    pub fn piece_of_color_at(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_mask(square);
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        [Color::Light, Color::Dark]
            .into_iter()
            .find_map(|color| self.piece_of_color_at(color, square).map(|kind| (color, kind)))
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.bitboard(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Number of pieces of `color`, kings excluded.
    #[inline]
    pub fn non_king_count(&self, color: Color) -> u32 {
        (self.occupancy(color) & !self.bitboard(color, PieceKind::King)).count_ones()
    }

    /// True when no square is claimed by two of the 12 bitboards.
    pub fn bitboards_are_disjoint(&self) -> bool {
        let mut seen = 0u64;
        for bitboard in self.pieces.iter().flatten() {
            if seen & bitboard != 0 {
                return false;
            }
            seen |= bitboard;
        }
        true
    }

    /// Hand the move to the other side, advancing the fullmove number after Dark.
    #[inline]
    pub fn pass_turn(&mut self) {
        if self.side_to_move == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.opposite();
    }
}
