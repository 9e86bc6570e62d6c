//! Static evaluation behind the `BoardScorer` seam.
//!
//! Search only ever calls [`BoardScorer::score`], so alternate heuristics can
//! be swapped in without touching the search code. Scores are centipawns from
//! the perspective of the side to move.

use crate::board_state::chess_types::*;
use crate::moves::pawn_moves::{pawn_attack_origins, pawn_attacks};
use crate::moves::sliding_moves::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::step_moves::{king_targets, knight_targets};
use crate::search::eval_config::{EvalConfig, KingTable, PhaseWeights};
use crate::search::game_phase::detect_phase;
use crate::search::piece_square_tables::{
    piece_square_value, pst_index, KING_ACTIVE_TABLE, KING_SHELTERED_TABLE,
};

/// Magnitude of a mate at the root; mates found deeper score `MATE_SCORE - ply`.
pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, board: &BoardState) -> i32;
}

#[inline]
fn from_side_to_move(board: &BoardState, white_minus_black: i32) -> i32 {
    match board.side_to_move {
        Color::Light => white_minus_black,
        Color::Dark => -white_minus_black,
    }
}

#[inline]
const fn sign(color: Color) -> i32 {
    match color {
        Color::Light => 1,
        Color::Dark => -1,
    }
}

/// Plain material count with fixed middlegame values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &BoardState) -> i32 {
        let mut white_minus_black = 0i32;
        for color in [Color::Light, Color::Dark] {
            for piece in ALL_PIECE_KINDS {
                let count = board.bitboard(color, piece).count_ones() as i32;
                white_minus_black += sign(color) * count * Self::piece_value(piece);
            }
        }
        from_side_to_move(board, white_minus_black)
    }
}

const INNER_CENTER: u64 = 0x0000_0018_1800_0000;
const CENTER_RING: u64 = 0x0000_3C3C_3C3C_0000 & !INNER_CENTER;
const FILE_A: u64 = 0x0101_0101_0101_0101;

#[inline]
const fn file_mask(file: u8) -> u64 {
    FILE_A << file
}

#[inline]
const fn adjacent_files_mask(file: u8) -> u64 {
    let mut mask = 0u64;
    if file > 0 {
        mask |= file_mask(file - 1);
    }
    if file < 7 {
        mask |= file_mask(file + 1);
    }
    mask
}

/// Ranks strictly in front of `rank` from `color`'s point of view.
#[inline]
const fn ranks_ahead(color: Color, rank: u8) -> u64 {
    match color {
        Color::Light if rank >= 7 => 0,
        Color::Light => !0u64 << ((rank + 1) * 8),
        Color::Dark => (1u64 << (rank * 8)) - 1,
    }
}

/// Squares a piece attacks, blockers included.
#[inline]
pub(crate) fn piece_attacks(kind: PieceKind, color: Color, square: Square, occupied: u64) -> u64 {
    match kind {
        PieceKind::Pawn => pawn_attacks(color, square),
        PieceKind::Knight => knight_targets(square),
        PieceKind::Bishop => bishop_attacks(square, occupied),
        PieceKind::Rook => rook_attacks(square, occupied),
        PieceKind::Queen => queen_attacks(square, occupied),
        PieceKind::King => king_targets(square),
    }
}

/// No friendly pawn on an adjacent file level with or behind this one.
pub(crate) fn is_backward_pawn(board: &BoardState, color: Color, square: Square) -> bool {
    let own_pawns = board.bitboard(color, PieceKind::Pawn);
    let level_or_behind = !ranks_ahead(color, rank_of(square));
    own_pawns & adjacent_files_mask(file_of(square)) & level_or_behind == 0
}

#[inline]
pub(crate) fn is_supported_pawn(board: &BoardState, color: Color, square: Square) -> bool {
    pawn_attack_origins(color, square) & board.bitboard(color, PieceKind::Pawn) != 0
}

/// No enemy pawn ahead on this file or the two beside it.
pub(crate) fn is_passed_pawn(board: &BoardState, color: Color, square: Square) -> bool {
    let file = file_of(square);
    let span = (file_mask(file) | adjacent_files_mask(file)) & ranks_ahead(color, rank_of(square));
    board.bitboard(color.opposite(), PieceKind::Pawn) & span == 0
}

#[inline]
const fn relative_rank(color: Color, square: Square) -> usize {
    match color {
        Color::Light => rank_of(square) as usize,
        Color::Dark => 7 - rank_of(square) as usize,
    }
}

/// Phase-aware evaluator combining material, piece placement, pawn structure,
/// mobility and the pieces each piece attacks or defends.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer {
    pub config: EvalConfig,
}

impl PositionalScorer {
    pub const fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Score from White's point of view.
    pub fn white_minus_black(&self, board: &BoardState) -> i32 {
        let phase = detect_phase(board, &self.config.detection);
        let weights = self.config.phases.weights(phase);
        let occupied = board.occupied();

        [Color::Light, Color::Dark]
            .into_iter()
            .map(|color| sign(color) * self.side_score(board, color, weights, occupied))
            .sum()
    }

    fn side_score(&self, board: &BoardState, color: Color, weights: &PhaseWeights, occupied: u64) -> i32 {
        let own = board.occupancy(color);
        let mut score = 0i32;

        for kind in ALL_PIECE_KINDS {
            for square in squares_of(board.bitboard(color, kind)) {
                score += weights.piece_value(kind);
                score += piece_square_value(kind, color, square);

                if kind != PieceKind::King {
                    let mask = square_mask(square);
                    if mask & INNER_CENTER != 0 {
                        score += weights.center_bonus.inner;
                    } else if mask & CENTER_RING != 0 {
                        score += weights.center_bonus.ring;
                    }
                }

                let attacks = piece_attacks(kind, color, square, occupied);
                if matches!(kind, PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) {
                    score += self.config.mobility_weight * (attacks & !own).count_ones() as i32;
                }
                score += self.contact_term(board, color, weights, attacks);
            }
        }

        score + self.pawn_structure(board, color) + self.king_placement(board, color, weights)
    }

    /// Enemy pieces hit and friendly pieces covered by one attack set.
    fn contact_term(&self, board: &BoardState, color: Color, weights: &PhaseWeights, attacks: u64) -> i32 {
        let mut term = 0i32;
        for target in squares_of(attacks & board.occupied()) {
            match board.piece_at(target) {
                Some((owner, kind)) if owner == color => {
                    term += weights.piece_value(kind) / self.config.defender_divisor;
                }
                Some((_, kind)) => term += weights.piece_value(kind) / self.config.threat_divisor,
                None => {}
            }
        }
        term
    }

    fn pawn_structure(&self, board: &BoardState, color: Color) -> i32 {
        let mut score = 0i32;
        for square in squares_of(board.bitboard(color, PieceKind::Pawn)) {
            if is_backward_pawn(board, color, square) {
                score -= self.config.backward_pawn_penalty;
            }
            if is_supported_pawn(board, color, square) {
                score += self.config.supported_pawn_bonus;
            }
            if is_passed_pawn(board, color, square) {
                score += self.config.passed_pawn_bonus[relative_rank(color, square)];
            }
        }
        score
    }

    fn king_placement(&self, board: &BoardState, color: Color, weights: &PhaseWeights) -> i32 {
        let Some(king) = board.king_square(color) else {
            return 0;
        };

        let table = match weights.king_table {
            KingTable::Sheltered => &KING_SHELTERED_TABLE,
            KingTable::Active => &KING_ACTIVE_TABLE,
        };
        let mut score = table[pst_index(color, king)];

        if weights.king_shelter_bonus != 0 && rank_of(king) == color.home_rank() {
            let shield = [-1i8, 0, 1]
                .into_iter()
                .filter_map(|df| offset_square(king, df, color.pawn_direction()))
                .filter(|&sq| board.bitboard(color, PieceKind::Pawn) & square_mask(sq) != 0)
                .count() as i32;
            score += weights.king_shelter_bonus * shield / 3;
        }
        score
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, board: &BoardState) -> i32 {
        from_side_to_move(board, self.white_minus_black(board))
    }
}
