//! Node counting over the generator and legality filter.

use crate::board_state::board_state::BoardState;
use crate::chess_errors::MoveGenResult;
use crate::move_generation::attack_detector::is_king_attacked;
use crate::move_generation::move_apply::play_move;
use crate::move_generation::move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, board: &BoardState, depth: u8) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(board)? {
        let next = play_move(board, &mv)?;

        if depth == 1 {
            total.nodes += 1;
            total.captures += u64::from(mv.is_capture());
            total.en_passant += u64::from(mv.is_en_passant());
            total.castles += u64::from(mv.is_castle());
            total.promotions += u64::from(mv.promotion.is_some());
            total.checks += u64::from(is_king_attacked(&next));
        } else {
            total.merge(perft(generator, &next, depth - 1)?);
        }
    }

    Ok(total)
}

/// Leaf count below each root move, keyed by coordinate notation.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    board: &BoardState,
    depth: u8,
) -> MoveGenResult<Vec<(String, u64)>> {
    let mut out = Vec::new();
    for mv in generator.generate_legal_moves(board)? {
        let next = play_move(board, &mv)?;
        let below = perft(generator, &next, depth.saturating_sub(1))?;
        out.push((mv.to_coordinate(), below.nodes));
    }
    Ok(out)
}
