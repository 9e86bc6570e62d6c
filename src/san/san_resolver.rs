//! Reverse disambiguation: from a move token back to the square it left.
//!
//! Candidates are scanned in a fixed order per piece type. Sliding pieces are
//! found by casting rays outward from the destination; the first occupied
//! square on each ray is the only candidate that ray can offer. Knights and
//! kings test their fixed offsets directly. A candidate is accepted when it
//! matches the given rank, else the given file, else unconditionally when no
//! disambiguator was written.

use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::chess_errors::{MoveGenResult, SanError};
use crate::move_generation::move_apply::apply_move;
use crate::move_generation::pseudo_moves_king::castling_move;
use crate::moves::chess_move::{ChessMove, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};
use crate::moves::sliding_moves::{first_blocker, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS};
use crate::moves::step_moves::{KING_OFFSETS, KNIGHT_OFFSETS};
use crate::san::san_token::{parse_san_token, SanMove, SanToken};

/// Every square holding a `piece` of `color` that could move to `dest`, in scan order.
pub fn candidate_sources(
    board: &BoardState,
    color: Color,
    piece: PieceKind,
    dest: Square,
    capture: bool,
) -> Vec<Square> {
    let own = board.bitboard(color, piece);
    let holds_piece = |sq: Square| own & square_mask(sq) != 0;
    let mut found = Vec::new();

    match piece {
        PieceKind::Pawn => {
            let back = -color.pawn_direction();
            if capture {
                for file_delta in [-1, 1] {
                    if let Some(origin) = offset_square(dest, file_delta, back) {
                        if holds_piece(origin) {
                            found.push(origin);
                        }
                    }
                }
            } else if board.is_empty_square(dest) {
                let one_back = offset_square(dest, 0, back);
                let double_rank = i16::from(color.pawn_start_rank()) + 2 * i16::from(color.pawn_direction());
                if let Some(skipped) = one_back {
                    if i16::from(rank_of(dest)) == double_rank && board.is_empty_square(skipped) {
                        if let Some(origin) = offset_square(skipped, 0, back) {
                            if holds_piece(origin) {
                                found.push(origin);
                            }
                        }
                    }
                    if holds_piece(skipped) {
                        found.push(skipped);
                    }
                }
            }
        }
        PieceKind::Rook => push_ray_sources(board, own, dest, &ORTHOGONAL_DIRECTIONS, &mut found),
        PieceKind::Bishop => push_ray_sources(board, own, dest, &DIAGONAL_DIRECTIONS, &mut found),
        PieceKind::Queen => {
            push_ray_sources(board, own, dest, &ORTHOGONAL_DIRECTIONS, &mut found);
            push_ray_sources(board, own, dest, &DIAGONAL_DIRECTIONS, &mut found);
        }
        PieceKind::Knight => push_offset_sources(own, dest, &KNIGHT_OFFSETS, &mut found),
        PieceKind::King => push_offset_sources(own, dest, &KING_OFFSETS, &mut found),
    }

    found
}

fn push_ray_sources(
    board: &BoardState,
    own: u64,
    dest: Square,
    directions: &[(i8, i8); 4],
    found: &mut Vec<Square>,
) {
    let occupied = board.occupied();
    for &dir in directions {
        if let Some(blocker) = first_blocker(dest, dir, occupied) {
            if own & square_mask(blocker) != 0 {
                found.push(blocker);
            }
        }
    }
}

fn push_offset_sources(own: u64, dest: Square, offsets: &[(i8, i8); 8], found: &mut Vec<Square>) {
    found.extend(
        offsets
            .iter()
            .filter_map(|&(df, dr)| offset_square(dest, df, dr))
            .filter(|&sq| own & square_mask(sq) != 0),
    );
}

/// Rank first, then file, then nothing written.
#[inline]
pub fn matches_disambiguator(square: Square, from_file: Option<u8>, from_rank: Option<u8>) -> bool {
    if from_rank == Some(rank_of(square)) {
        return true;
    }
    if from_file == Some(file_of(square)) {
        return true;
    }
    from_file.is_none() && from_rank.is_none()
}

/// Source square for a token's piece, destination and disambiguators.
pub fn find_source_square(
    board: &BoardState,
    piece: PieceKind,
    dest: Square,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    capture: bool,
) -> Result<Square, SanError> {
    let color = board.side_to_move;

    if let (Some(file), Some(rank)) = (from_file, from_rank) {
        let square = square_at(file, rank);
        return if board.bitboard(color, piece) & square_mask(square) != 0 {
            Ok(square)
        } else {
            Err(SanError::EmptySource { piece, square })
        };
    }

    candidate_sources(board, color, piece, dest, capture)
        .into_iter()
        .find(|&sq| matches_disambiguator(sq, from_file, from_rank))
        .ok_or(SanError::NoSource { piece, dest })
}

/// Turn a parsed token into a structured move for the side to move.
pub fn resolve_token(board: &BoardState, token: &SanToken) -> Result<ChessMove, SanError> {
    let color = board.side_to_move;

    match token.mv {
        SanMove::Castle(side) => castling_move(board, side),
        SanMove::Piece {
            piece,
            from_file,
            from_rank,
            capture,
            dest,
            promotion,
        } => {
            if board.occupancy(color) & square_mask(dest) != 0 {
                return Err(SanError::NoSource { piece, dest });
            }

            let from = find_source_square(board, piece, dest, from_file, from_rank, capture)?;
            let enemy_on_dest = board.occupancy(color.opposite()) & square_mask(dest) != 0;
            let en_passant = piece == PieceKind::Pawn
                && capture
                && !enemy_on_dest
                && board.en_passant_square == Some(dest);

            if piece == PieceKind::Pawn && capture && !enemy_on_dest && !en_passant {
                return Err(SanError::NoSource { piece, dest });
            }

            let mut flags = 0;
            if enemy_on_dest {
                flags |= FLAG_CAPTURE;
            }
            if en_passant {
                flags |= FLAG_CAPTURE | FLAG_EN_PASSANT;
            }
            if piece == PieceKind::Pawn && rank_of(from).abs_diff(rank_of(dest)) == 2 {
                flags |= FLAG_DOUBLE_PAWN_PUSH;
            }

            let mv = ChessMove::new(piece, from, dest, flags);
            Ok(match promotion {
                Some(promo) => mv.with_promotion(promo),
                None => mv,
            })
        }
    }
}

/// Parse `token`, resolve it and apply it to `board` (side to move unchanged).
pub fn apply_token(board: &mut BoardState, token: &str) -> MoveGenResult<ChessMove> {
    let parsed = parse_san_token(token)?;
    let mv = resolve_token(board, &parsed)?;
    apply_move(board, &mv)?;
    Ok(mv)
}
