//! Pawn capture geometry.

use crate::board_state::chess_types::*;

/// `[color][square]` -> squares a pawn of that color on that square attacks.
pub const PAWN_ATTACKS: [[u64; 64]; 2] = [
    build_pawn_attacks(Color::Light),
    build_pawn_attacks(Color::Dark),
];

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    PAWN_ATTACKS[color.index()][square as usize]
}

/// Squares a pawn of `color` would have to stand on to attack `square`.
#[inline]
pub const fn pawn_attack_origins(color: Color, square: Square) -> u64 {
    // Pawn capture geometry is point-symmetric between the two colors.
    pawn_attacks(color.opposite(), square)
}

const fn build_pawn_attacks(color: Color) -> [u64; 64] {
    let mut table = [0u64; 64];
    let forward = color.pawn_direction();
    let mut square = 0u8;

    while square < 64 {
        let mut attacks = 0u64;
        if let Some(left) = offset_square(square, -1, forward) {
            attacks |= square_mask(left);
        }
        if let Some(right) = offset_square(square, 1, forward) {
            attacks |= square_mask(right);
        }
        table[square as usize] = attacks;
        square += 1;
    }

    table
}
