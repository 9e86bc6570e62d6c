//! Legality filtering by trial application.
//!
//! Each candidate is applied to a scratch copy and kept only if the mover's
//! king is not attacked afterward. Captures landing on the enemy king are
//! dropped before that test: a king capture can only appear when the previous
//! move left its own king en prise, so it is treated as illegal outright.

use tracing::{trace, warn};

use crate::board_state::board_state::BoardState;
use crate::chess_errors::MoveGenResult;
use crate::move_generation::attack_detector::is_king_attacked;
use crate::move_generation::move_apply::apply_move;
use crate::move_generation::move_generator::{
    generate_captures, generate_pseudo_legal_moves, MoveGenerator,
};
use crate::moves::chess_move::ChessMove;
use crate::san::san_resolver::resolve_token;
use crate::san::san_token::{filter_valid_tokens, parse_san_token};
use crate::san::san_writer::move_to_san;

pub fn filter_legal(board: &BoardState, candidates: &[ChessMove]) -> MoveGenResult<Vec<ChessMove>> {
    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        if captures_enemy_king(board, mv) {
            warn!(mv = %mv.to_coordinate(), "king capture reached the legality filter");
            continue;
        }
        if leaves_king_safe(board, mv)? {
            legal.push(*mv);
        }
    }
    Ok(legal)
}

pub fn generate_legal_moves(board: &BoardState) -> MoveGenResult<Vec<ChessMove>> {
    filter_legal(board, &generate_pseudo_legal_moves(board))
}

pub fn generate_legal_captures(board: &BoardState) -> MoveGenResult<Vec<ChessMove>> {
    filter_legal(board, &generate_captures(board))
}

/// Keep the tokens of a space-separated stream that resolve to legal moves.
///
/// Tokens that fall outside the alphabet, fail to parse or fail to resolve
/// are dropped, never reported.
pub fn filter_legal_tokens(board: &BoardState, stream: &str) -> Vec<String> {
    filter_valid_tokens(stream)
        .into_iter()
        .filter(|token| {
            let resolved = parse_san_token(token).and_then(|parsed| resolve_token(board, &parsed));
            match resolved {
                Ok(mv) if captures_enemy_king(board, &mv) => {
                    trace!(token, "dropping king capture");
                    false
                }
                Ok(mv) => match leaves_king_safe(board, &mv) {
                    Ok(safe) => safe,
                    Err(err) => {
                        trace!(token, %err, "dropping token that failed to apply");
                        false
                    }
                },
                Err(err) => {
                    trace!(token, %err, "dropping unresolvable token");
                    false
                }
            }
        })
        .map(str::to_owned)
        .collect()
}

/// Space-separated tokens for `moves`, as handed to text collaborators.
pub fn moves_to_token_stream(board: &BoardState, moves: &[ChessMove]) -> MoveGenResult<String> {
    let tokens = moves
        .iter()
        .map(|mv| move_to_san(board, mv))
        .collect::<MoveGenResult<Vec<String>>>()?;
    Ok(tokens.join(" "))
}

fn captures_enemy_king(board: &BoardState, mv: &ChessMove) -> bool {
    mv.is_capture() && board.king_square(board.side_to_move.opposite()) == Some(mv.to)
}

fn leaves_king_safe(board: &BoardState, mv: &ChessMove) -> MoveGenResult<bool> {
    let mut scratch = *board;
    apply_move(&mut scratch, mv)?;
    Ok(!is_king_attacked(&scratch))
}

/// Generator backed by pseudo-legal generation plus trial application.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, board: &BoardState) -> MoveGenResult<Vec<ChessMove>> {
        generate_legal_moves(board)
    }

    fn generate_legal_captures(&self, board: &BoardState) -> MoveGenResult<Vec<ChessMove>> {
        generate_legal_captures(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_state::chess_types::*;
    use crate::move_generation::attack_detector::is_side_in_check;
    use crate::moves::chess_move::FLAG_CAPTURE;

    fn board(fen: &str) -> BoardState {
        BoardState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let moves = generate_legal_moves(&BoardState::new_game()).expect("generation should succeed");
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn fools_mate_leaves_white_without_moves() {
        let mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(generate_legal_moves(&mated).expect("generation should succeed").is_empty());
        assert!(is_king_attacked(&mated));
    }

    #[test]
    fn stalemate_has_no_moves_and_no_check() {
        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(generate_legal_moves(&stalemate).expect("generation should succeed").is_empty());
        assert!(!is_king_attacked(&stalemate));
    }

    #[test]
    fn pinned_piece_may_only_move_along_the_pin() {
        let b = board("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let rook_moves: Vec<_> = generate_legal_moves(&b)
            .expect("generation should succeed")
            .into_iter()
            .filter(|mv| mv.piece == PieceKind::Rook)
            .collect();
        // e3..e7 plus the capture on e8.
        assert_eq!(rook_moves.len(), 6);
        assert!(rook_moves.iter().all(|mv| file_of(mv.to) == 4));
    }

    #[test]
    fn king_capture_is_excluded_by_the_guard() {
        // Dark left its king en prise; the capture is pseudo-legal but filtered.
        let b = board("4k3/8/8/8/8/8/8/4RK2 w - - 0 1");
        let king_capture = ChessMove::new(PieceKind::Rook, 4, 60, FLAG_CAPTURE);
        let legal = filter_legal(&b, &[king_capture]).expect("filter should succeed");
        assert!(legal.is_empty());
    }

    #[test]
    fn filtering_a_legal_list_is_idempotent() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let legal = generate_legal_moves(&b).expect("generation should succeed");
        assert_eq!(legal.len(), 48);
        assert_eq!(filter_legal(&b, &legal).expect("filter should succeed"), legal);

        let stream = moves_to_token_stream(&b, &legal).expect("moves should format");
        let tokens = filter_legal_tokens(&b, &stream);
        assert_eq!(tokens.len(), 48);
        assert_eq!(tokens.join(" "), stream);
    }

    #[test]
    fn token_filter_drops_illegal_and_malformed_tokens() {
        // White is in check from the e8 rook; only king moves and blocks survive.
        let b = board("4r2k/8/8/8/8/8/3R4/4K3 w - - 0 1");
        let kept = filter_legal_tokens(&b, "Re2 Rd3 Kd1 Kf2 Ke2 e4! Zz9 Rxe8");
        assert_eq!(kept, vec!["Re2", "Kd1", "Kf2"]);
    }

    #[test]
    fn castling_tokens_obey_every_castling_condition() {
        let start = BoardState::new_game();
        assert_eq!(filter_legal_tokens(&start, "O-O O-O-O e4"), vec!["e4"]);

        let rightless = board("4k3/8/8/8/8/8/8/4K2R w - - 0 1");
        assert!(filter_legal_tokens(&rightless, "O-O").is_empty());

        let in_check = board("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(filter_legal_tokens(&in_check, "O-O O-O-O").is_empty());

        let crossing = board("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(filter_legal_tokens(&crossing, "O-O O-O-O"), vec!["O-O-O"]);

        let open = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(filter_legal_tokens(&open, "O-O O-O-O"), vec!["O-O", "O-O-O"]);
    }

    #[test]
    fn legal_captures_are_a_subset_of_legal_moves() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let captures = generate_legal_captures(&b).expect("generation should succeed");
        let all = generate_legal_moves(&b).expect("generation should succeed");

        assert_eq!(captures.len(), 8);
        assert!(captures.iter().all(|mv| mv.is_capture() && all.contains(mv)));
    }

    #[test]
    fn random_playouts_keep_every_square_single_owned() {
        use rand::rngs::StdRng;
        use rand::seq::IndexedRandom;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..20 {
            let mut b = BoardState::new_game();
            for _ in 0..80 {
                let moves = generate_legal_moves(&b).expect("generation should succeed");
                let Some(mv) = moves.choose(&mut rng) else {
                    break;
                };
                b = crate::move_generation::move_apply::play_move(&b, mv).expect("legal move should apply");

                assert!(b.bitboards_are_disjoint(), "overlap after {}", mv.to_coordinate());
                assert_eq!(b.bitboard(Color::Light, PieceKind::King).count_ones(), 1);
                assert_eq!(b.bitboard(Color::Dark, PieceKind::King).count_ones(), 1);
                assert!(!is_side_in_check(&b, b.side_to_move.opposite()));
            }
        }
    }
}
