//! Algebraic move-token grammar.
//!
//! `[Piece][file][rank][x]dest[=Promo][+|++]`, or `O-O` / `O-O-O`. Pieces are
//! `K Q R B N` and omitted for pawns. Trailing check markers are counted and
//! stripped before the rest of the token is read.

use std::fmt;
use std::str::FromStr;

use crate::board_state::chess_rules::{CastleSide, MOVE_TOKEN_ALPHABET};
use crate::board_state::chess_types::*;
use crate::chess_errors::SanError;
use crate::utils::algebraic::{
    file_from_char, file_to_char, rank_from_char, rank_to_char, square_to_algebraic,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanMove {
    Castle(CastleSide),
    Piece {
        piece: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        capture: bool,
        dest: Square,
        promotion: Option<PieceKind>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanToken {
    pub mv: SanMove,
    /// 1 for `+`, 2 for `++`.
    pub check_marks: u8,
}

/// True when `token` is non-empty and uses only move-token characters.
pub fn is_valid_move_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| MOVE_TOKEN_ALPHABET.contains(ch))
}

/// Split a space-separated stream and keep the tokens inside the alphabet.
pub fn filter_valid_tokens(stream: &str) -> Vec<&str> {
    stream
        .split_whitespace()
        .filter(|token| {
            let keep = is_valid_move_token(token);
            if !keep {
                tracing::trace!(token, "dropping token outside the move alphabet");
            }
            keep
        })
        .collect()
}

pub fn parse_san_token(token: &str) -> Result<SanToken, SanError> {
    if token.is_empty() {
        return Err(SanError::Empty);
    }
    if !is_valid_move_token(token) {
        return Err(SanError::OutsideAlphabet { token: token.to_owned() });
    }

    let body = token.trim_end_matches(['+', '#']);
    let check_marks = token[body.len()..].chars().filter(|&ch| ch == '+').count();
    let malformed = || SanError::Malformed { token: token.to_owned() };
    if body.is_empty() || check_marks > 2 {
        return Err(malformed());
    }
    let check_marks = check_marks as u8;

    match body {
        "O-O" | "0-0" => {
            return Ok(SanToken {
                mv: SanMove::Castle(CastleSide::Kingside),
                check_marks,
            })
        }
        "O-O-O" | "0-0-0" => {
            return Ok(SanToken {
                mv: SanMove::Castle(CastleSide::Queenside),
                check_marks,
            })
        }
        _ => {}
    }

    let chars: Vec<char> = body.chars().collect();
    let mut end = chars.len();

    let mut promotion = None;
    if end >= 2 && chars[end - 2] == '=' {
        promotion = Some(promotion_piece(chars[end - 1]).ok_or_else(malformed)?);
        end -= 2;
    }

    if end < 2 {
        return Err(malformed());
    }
    let dest_file = file_from_char(chars[end - 2]).ok_or_else(malformed)?;
    let dest_rank = rank_from_char(chars[end - 1]).ok_or_else(malformed)?;
    let dest = square_at(dest_file, dest_rank);
    end -= 2;

    let mut start = 0;
    let piece = match chars.first().copied().and_then(PieceKind::from_san_letter) {
        Some(piece) if end > 0 => {
            start = 1;
            piece
        }
        _ => PieceKind::Pawn,
    };

    let mut rest = chars[start..end].iter().copied().peekable();
    let from_file = rest.next_if(|&ch| file_from_char(ch).is_some()).and_then(file_from_char);
    let from_rank = rest.next_if(|&ch| rank_from_char(ch).is_some()).and_then(rank_from_char);
    let capture = rest.next_if_eq(&'x').is_some();
    if rest.next().is_some() {
        return Err(malformed());
    }

    if piece == PieceKind::Pawn {
        let on_last_rank = dest_rank == 0 || dest_rank == 7;
        let shape_ok = from_rank.is_none()
            && (capture == from_file.is_some())
            && (promotion.is_some() == on_last_rank);
        if !shape_ok {
            return Err(malformed());
        }
    } else if promotion.is_some() {
        return Err(malformed());
    }

    Ok(SanToken {
        mv: SanMove::Piece {
            piece,
            from_file,
            from_rank,
            capture,
            dest,
            promotion,
        },
        check_marks,
    })
}

fn promotion_piece(letter: char) -> Option<PieceKind> {
    PieceKind::from_san_letter(letter).filter(|&piece| piece != PieceKind::King)
}

impl FromStr for SanToken {
    type Err = SanError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        parse_san_token(token)
    }
}

impl fmt::Display for SanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mv {
            SanMove::Castle(CastleSide::Kingside) => f.write_str("O-O")?,
            SanMove::Castle(CastleSide::Queenside) => f.write_str("O-O-O")?,
            SanMove::Piece {
                piece,
                from_file,
                from_rank,
                capture,
                dest,
                promotion,
            } => {
                if let Some(letter) = piece.san_letter() {
                    write!(f, "{letter}")?;
                }
                if let Some(file) = from_file {
                    write!(f, "{}", file_to_char(file))?;
                }
                if let Some(rank) = from_rank {
                    write!(f, "{}", rank_to_char(rank))?;
                }
                if capture {
                    f.write_str("x")?;
                }
                f.write_str(&square_to_algebraic(dest))?;
                if let Some(letter) = promotion.and_then(PieceKind::san_letter) {
                    write!(f, "={letter}")?;
                }
            }
        }
        for _ in 0..self.check_marks {
            f.write_str("+")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_move(token: &str) -> (PieceKind, Option<u8>, Option<u8>, bool, Square, Option<PieceKind>) {
        match parse_san_token(token).expect("token should parse").mv {
            SanMove::Piece {
                piece,
                from_file,
                from_rank,
                capture,
                dest,
                promotion,
            } => (piece, from_file, from_rank, capture, dest, promotion),
            SanMove::Castle(_) => panic!("{token} parsed as castling"),
        }
    }

    #[test]
    fn parses_pawn_pushes_and_captures() {
        assert_eq!(piece_move("e4"), (PieceKind::Pawn, None, None, false, 28, None));
        assert_eq!(piece_move("exd5"), (PieceKind::Pawn, Some(4), None, true, 35, None));
        assert_eq!(
            piece_move("bxa8=N"),
            (PieceKind::Pawn, Some(1), None, true, 56, Some(PieceKind::Knight))
        );
    }

    #[test]
    fn parses_disambiguated_piece_moves() {
        assert_eq!(piece_move("Nf3"), (PieceKind::Knight, None, None, false, 21, None));
        assert_eq!(piece_move("Rae1"), (PieceKind::Rook, Some(0), None, false, 4, None));
        assert_eq!(piece_move("N5xd4"), (PieceKind::Knight, None, Some(4), true, 27, None));
        assert_eq!(piece_move("Qh4e1"), (PieceKind::Queen, Some(7), Some(3), false, 4, None));
        // Bishop letter is upper case; lower-case b is a file.
        assert_eq!(piece_move("Bxb7"), (PieceKind::Bishop, None, None, true, 49, None));
    }

    #[test]
    fn check_markers_are_counted_and_stripped() {
        let token = parse_san_token("Qxf7++").expect("token should parse");
        assert_eq!(token.check_marks, 2);
        assert_eq!(parse_san_token("Qh5#").expect("token should parse").check_marks, 0);
        assert_eq!(token.to_string(), "Qxf7++");
    }

    #[test]
    fn castling_tokens_accept_letter_and_digit_forms() {
        for (token, side) in [
            ("O-O", CastleSide::Kingside),
            ("0-0", CastleSide::Kingside),
            ("O-O-O+", CastleSide::Queenside),
            ("0-0-0", CastleSide::Queenside),
        ] {
            assert_eq!(parse_san_token(token).expect("castle should parse").mv, SanMove::Castle(side));
        }
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for bad in ["", "e", "e9", "Pe4", "xe4", "e8", "e7=Q", "Ke8=Q", "e4e5", "O-O-O-O", "Nf3+++", "K"] {
            assert!(parse_san_token(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn alphabet_filter_drops_foreign_tokens_only() {
        let kept = filter_valid_tokens("e4 Nf3 e2e4! Ke7 h1=Q? O-O");
        assert_eq!(kept, vec!["e4", "Nf3", "Ke7", "O-O"]);
        assert!(is_valid_move_token("exd8=Q+"));
        assert!(!is_valid_move_token("Pe4"));
    }
}
