//! Ray casting for rooks, bishops and queens.
//!
//! A ray walks one `(file_delta, rank_delta)` step at a time and stops at the
//! first occupied square, which is included in the result so captures and
//! attack tests see the blocker. Stepping goes through `offset_square`, so a
//! diagonal can never wrap from the h-file to the a-file.

use crate::board_state::chess_types::*;

/// Orthogonal directions in resolver scan order: down, up, right, left.
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// Diagonal directions in resolver scan order.
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Squares along one direction up to and including the first blocker.
pub fn ray_attacks(square: Square, direction: (i8, i8), occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    let mut current = square;

    while let Some(next) = offset_square(current, direction.0, direction.1) {
        let bit = square_mask(next);
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
        current = next;
    }

    attacks
}

/// First occupied square met walking from `square` along `direction`.
pub fn first_blocker(square: Square, direction: (i8, i8), occupancy: u64) -> Option<Square> {
    let mut current = square;
    while let Some(next) = offset_square(current, direction.0, direction.1) {
        if occupancy & square_mask(next) != 0 {
            return Some(next);
        }
        current = next;
    }
    None
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ORTHOGONAL_DIRECTIONS
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(square, dir, occupancy))
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    DIAGONAL_DIRECTIONS
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(square, dir, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}
