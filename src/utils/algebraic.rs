//! Square-name conversions (`e4` <-> 28) under the canonical a1 = 0 mapping.

use crate::board_state::chess_types::*;

/// Parse a two-character square name such as `e4`.
#[inline]
pub fn algebraic_to_square(name: &str) -> Option<Square> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = file_from_char(char::from(bytes[0]))?;
    let rank = rank_from_char(char::from(bytes[1]))?;
    Some(square_at(file, rank))
}

/// Name of an on-board square (`0..=63`).
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square < 64, "square index out of bounds: {square}");
    format!("{}{}", file_to_char(file_of(square)), rank_to_char(rank_of(square)))
}

#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    ('a'..='h').contains(&ch).then(|| ch as u8 - b'a')
}

#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    ('1'..='8').contains(&ch).then(|| ch as u8 - b'1')
}

#[inline]
pub fn file_to_char(file: u8) -> char {
    char::from(b'a' + file)
}

#[inline]
pub fn rank_to_char(rank: u8) -> char {
    char::from(b'1' + rank)
}
