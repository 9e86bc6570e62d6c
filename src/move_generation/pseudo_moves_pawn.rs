//! Pawn pushes, captures, promotions and en passant.

use crate::board_state::chess_rules::PROMOTION_PIECES;
use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::moves::chess_move::{
    ChessMove, MoveFlags, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_quiet_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    let side = board.side_to_move;
    let forward = side.pawn_direction();
    let empty = !board.occupied();

    for from in squares_of(board.bitboard(side, PieceKind::Pawn)) {
        let Some(one) = offset_square(from, 0, forward) else {
            continue;
        };
        if empty & square_mask(one) == 0 {
            continue;
        }
        push_with_promotions(side, from, one, 0, out);

        if rank_of(from) == side.pawn_start_rank() {
            if let Some(two) = offset_square(one, 0, forward) {
                if empty & square_mask(two) != 0 {
                    out.push(ChessMove::new(PieceKind::Pawn, from, two, FLAG_DOUBLE_PAWN_PUSH));
                }
            }
        }
    }
}

pub fn generate_pawn_captures(board: &BoardState, out: &mut Vec<ChessMove>) {
    let side = board.side_to_move;
    let enemy = board.occupancy(side.opposite());
    let en_passant = en_passant_target(board);

    for from in squares_of(board.bitboard(side, PieceKind::Pawn)) {
        let attacks = pawn_attacks(side, from);
        for to in squares_of(attacks & enemy) {
            push_with_promotions(side, from, to, FLAG_CAPTURE, out);
        }
        if let Some(target) = en_passant {
            if attacks & square_mask(target) != 0 {
                out.push(ChessMove::new(
                    PieceKind::Pawn,
                    from,
                    target,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

/// The en-passant square, if it is empty with an enemy pawn just past it.
fn en_passant_target(board: &BoardState) -> Option<Square> {
    let target = board.en_passant_square?;
    let side = board.side_to_move;
    let victim = offset_square(target, 0, -side.pawn_direction())?;
    let victim_present = board.bitboard(side.opposite(), PieceKind::Pawn) & square_mask(victim) != 0;
    (board.is_empty_square(target) && victim_present).then_some(target)
}

fn push_with_promotions(side: Color, from: Square, to: Square, flags: MoveFlags, out: &mut Vec<ChessMove>) {
    let mv = ChessMove::new(PieceKind::Pawn, from, to, flags);
    if rank_of(to) == side.promotion_rank() {
        out.extend(PROMOTION_PIECES.iter().map(|&piece| mv.with_promotion(piece)));
    } else {
        out.push(mv);
    }
}
