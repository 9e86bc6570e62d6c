//! Square-attack queries used for check and legality testing.
//!
//! Attacks are found by looking outward from the target square: pawn origins,
//! knight hops, the first blocker on each orthogonal and diagonal ray, and the
//! adjacent king squares. None of these queries mutate the board.

use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::moves::pawn_moves::pawn_attack_origins;
use crate::moves::sliding_moves::{first_blocker, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS};
use crate::moves::step_moves::{king_targets, knight_targets};

pub fn is_square_attacked(board: &BoardState, square: Square, by: Color) -> bool {
    if pawn_attack_origins(by, square) & board.bitboard(by, PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_targets(square) & board.bitboard(by, PieceKind::Knight) != 0 {
        return true;
    }

    let occupied = board.occupied();
    let queens = board.bitboard(by, PieceKind::Queen);

    let rooks_queens = board.bitboard(by, PieceKind::Rook) | queens;
    if slider_hits(square, &ORTHOGONAL_DIRECTIONS, occupied, rooks_queens) > 0 {
        return true;
    }

    let bishops_queens = board.bitboard(by, PieceKind::Bishop) | queens;
    if slider_hits(square, &DIAGONAL_DIRECTIONS, occupied, bishops_queens) > 0 {
        return true;
    }

    king_targets(square) & board.bitboard(by, PieceKind::King) != 0
}

/// Number of `by` pieces attacking `square`.
pub fn attackers_count(board: &BoardState, square: Square, by: Color) -> u32 {
    let occupied = board.occupied();
    let queens = board.bitboard(by, PieceKind::Queen);

    (pawn_attack_origins(by, square) & board.bitboard(by, PieceKind::Pawn)).count_ones()
        + (knight_targets(square) & board.bitboard(by, PieceKind::Knight)).count_ones()
        + slider_hits(
            square,
            &ORTHOGONAL_DIRECTIONS,
            occupied,
            board.bitboard(by, PieceKind::Rook) | queens,
        )
        + slider_hits(
            square,
            &DIAGONAL_DIRECTIONS,
            occupied,
            board.bitboard(by, PieceKind::Bishop) | queens,
        )
        + (king_targets(square) & board.bitboard(by, PieceKind::King)).count_ones()
}

#[inline]
pub fn is_side_in_check(board: &BoardState, color: Color) -> bool {
    let Some(king) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king, color.opposite())
}

/// Whether the side to move has its king attacked.
#[inline]
pub fn is_king_attacked(board: &BoardState) -> bool {
    is_side_in_check(board, board.side_to_move)
}

fn slider_hits(square: Square, directions: &[(i8, i8); 4], occupied: u64, sliders: u64) -> u32 {
    directions
        .iter()
        .filter_map(|&dir| first_blocker(square, dir, occupied))
        .filter(|&blocker| sliders & square_mask(blocker) != 0)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::sliding_moves::rook_attacks;

    fn board(fen: &str) -> BoardState {
        BoardState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn starting_position_has_no_checks() {
        let start = BoardState::new_game();
        assert!(!is_king_attacked(&start));
        assert!(!is_side_in_check(&start, Color::Dark));
        // f3 is covered by the g1 knight and the e2/g2 pawns.
        assert_eq!(attackers_count(&start, square_at(5, 2), Color::Light), 3);
    }

    #[test]
    fn fools_mate_king_is_attacked() {
        let mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_king_attacked(&mated));
    }

    #[test]
    fn rook_attack_is_symmetric_along_the_ray() {
        let b = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let a1 = square_at(0, 0);
        let a7 = square_at(0, 6);

        assert!(rook_attacks(a1, b.occupied()) & square_mask(a7) != 0);
        assert!(is_square_attacked(&b, a7, Color::Light));
        assert!(rook_attacks(a7, b.occupied()) & square_mask(a1) != 0);
    }

    #[test]
    fn blockers_stop_sliding_attacks() {
        let open = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let blocked = board("4k3/8/8/8/P7/8/8/R3K3 w - - 0 1");
        let a8 = square_at(0, 7);

        assert!(is_square_attacked(&open, a8, Color::Light));
        assert!(!is_square_attacked(&blocked, a8, Color::Light));
    }

    #[test]
    fn diagonal_attacks_do_not_wrap_across_edges() {
        // Bishop on h4 would reach a6 if diagonals wrapped.
        let b = board("4k3/8/8/8/7B/8/8/4K3 w - - 0 1");
        assert!(!is_square_attacked(&b, square_at(0, 5), Color::Light));
        assert!(is_square_attacked(&b, square_at(4, 6), Color::Light));
    }

    #[test]
    fn pawn_attacks_face_forward_only() {
        let b = board("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&b, square_at(2, 3), Color::Dark));
        assert!(is_square_attacked(&b, square_at(4, 3), Color::Dark));
        assert!(!is_square_attacked(&b, square_at(2, 5), Color::Dark));
    }

    #[test]
    fn double_check_counts_two_attackers() {
        let b = board("4k3/8/3N4/8/8/8/8/4R1K1 b - - 0 1");
        let e8 = square_at(4, 7);
        assert_eq!(attackers_count(&b, e8, Color::Light), 2);
        assert!(is_king_attacked(&b));
    }
}
