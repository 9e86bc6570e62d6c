//! Fixed-offset geometry for knights and kings.
//!
//! Offsets are `(file_delta, rank_delta)` pairs listed in the order the move
//! resolver scans them. Targets are precomputed once per square; an offset
//! that would leave the board or wrap to the other edge contributes nothing.

use crate::board_state::chess_types::*;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const KNIGHT_TARGETS: [u64; 64] = build_step_table(&KNIGHT_OFFSETS);
pub const KING_TARGETS: [u64; 64] = build_step_table(&KING_OFFSETS);

#[inline]
pub const fn knight_targets(square: Square) -> u64 {
    KNIGHT_TARGETS[square as usize]
}

#[inline]
pub const fn king_targets(square: Square) -> u64 {
    KING_TARGETS[square as usize]
}

const fn build_step_table(offsets: &[(i8, i8); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut square = 0u8;

    while square < 64 {
        let mut targets = 0u64;
        let mut i = 0;
        while i < offsets.len() {
            if let Some(target) = offset_square(square, offsets[i].0, offsets[i].1) {
                targets |= square_mask(target);
            }
            i += 1;
        }
        table[square as usize] = targets;
        square += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_target_counts_shrink_at_edges() {
        assert_eq!(knight_targets(27).count_ones(), 8); // d4
        assert_eq!(knight_targets(0).count_ones(), 2); // a1
        assert_eq!(knight_targets(7).count_ones(), 2); // h1
        assert_eq!(knight_targets(15).count_ones(), 3); // h2
    }

    #[test]
    fn knight_on_h_file_never_wraps_to_a_file() {
        let a_and_b_files = 0x0303_0303_0303_0303u64;
        for rank in 0..8 {
            assert_eq!(knight_targets(square_at(7, rank)) & a_and_b_files, 0);
        }
    }

    #[test]
    fn king_targets_match_adjacency() {
        assert_eq!(king_targets(27).count_ones(), 8);
        assert_eq!(king_targets(0), square_mask(1) | square_mask(8) | square_mask(9));
        assert_eq!(king_targets(63).count_ones(), 3);
    }
}
