//! Tunable weights for [`PositionalScorer`](crate::search::board_scoring::PositionalScorer).
//!
//! One [`PhaseWeights`] record per game phase; the scorer looks the record up
//! after classifying the position, so every phase is scored by the same code.

use crate::board_state::chess_types::PieceKind;
use crate::search::game_phase::{GamePhase, PhaseDetection};

/// Which king table the phase uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KingTable {
    Sheltered,
    Active,
}

/// Bonus for a non-king piece standing on the central squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterBonus {
    /// d4, e4, d5, e5.
    pub inner: i32,
    /// The twelve squares ringing the inner center (c3 to f6 box).
    pub ring: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseWeights {
    /// Pawn, knight, bishop, rook, queen.
    pub piece_values: [i32; 5],
    pub center_bonus: CenterBonus,
    pub king_table: KingTable,
    /// Full bonus for three pawns directly in front of a back-rank king.
    pub king_shelter_bonus: i32,
}

impl PhaseWeights {
    #[inline]
    pub const fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::King => 0,
            _ => self.piece_values[kind.index()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTable {
    pub opening: PhaseWeights,
    pub middlegame: PhaseWeights,
    pub endgame: PhaseWeights,
}

impl PhaseTable {
    #[inline]
    pub const fn weights(&self, phase: GamePhase) -> &PhaseWeights {
        match phase {
            GamePhase::Opening => &self.opening,
            GamePhase::Middlegame => &self.middlegame,
            GamePhase::Endgame => &self.endgame,
        }
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            opening: PhaseWeights {
                piece_values: [110, 340, 350, 500, 900],
                center_bonus: CenterBonus { inner: 30, ring: 12 },
                king_table: KingTable::Sheltered,
                king_shelter_bonus: 30,
            },
            middlegame: PhaseWeights {
                piece_values: [100, 320, 330, 500, 900],
                center_bonus: CenterBonus { inner: 20, ring: 8 },
                king_table: KingTable::Sheltered,
                king_shelter_bonus: 20,
            },
            endgame: PhaseWeights {
                piece_values: [140, 290, 330, 560, 900],
                center_bonus: CenterBonus { inner: 8, ring: 4 },
                king_table: KingTable::Active,
                king_shelter_bonus: 0,
            },
        }
    }
}

/// Full evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    pub phases: PhaseTable,
    pub detection: PhaseDetection,
    /// Penalty for a pawn with no friendly pawn beside or behind it on adjacent files.
    pub backward_pawn_penalty: i32,
    /// Bonus for a pawn defended by a friendly pawn.
    pub supported_pawn_bonus: i32,
    /// Passed-pawn bonus indexed by rank counted from the pawn's own side.
    pub passed_pawn_bonus: [i32; 8],
    /// Per reachable square for knights, bishops, rooks and queens.
    pub mobility_weight: i32,
    /// Attacked enemy piece value is divided by this.
    pub threat_divisor: i32,
    /// Defended friendly piece value is divided by this.
    pub defender_divisor: i32,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            phases: PhaseTable::default(),
            detection: PhaseDetection::default(),
            backward_pawn_penalty: 12,
            supported_pawn_bonus: 8,
            passed_pawn_bonus: [0, 5, 10, 20, 35, 60, 100, 0],
            mobility_weight: 2,
            threat_divisor: 16,
            defender_divisor: 32,
        }
    }
}
