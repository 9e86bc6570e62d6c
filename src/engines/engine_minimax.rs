//! Minimax engine choosing among caller-supplied candidate tokens.

use tracing::{debug, trace};

use crate::board_state::board_state::BoardState;
use crate::chess_errors::{EngineError, MoveGenResult};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::resolve_depth;
use crate::move_generation::legal_filter::{filter_legal, LegalMoveGenerator};
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::ChessMove;
use crate::san::san_resolver::resolve_token;
use crate::san::san_token::parse_san_token;
use crate::san::san_writer::move_to_san;
use crate::search::board_scoring::PositionalScorer;
use crate::search::minimax::{MinimaxSearch, SearchConfig, SearchResult};

pub struct MinimaxEngine {
    config: SearchConfig,
    move_generator: LegalMoveGenerator,
    scorer: PositionalScorer,
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default(), PositionalScorer::default())
    }
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig, scorer: PositionalScorer) -> Self {
        Self {
            config,
            move_generator: LegalMoveGenerator,
            scorer,
        }
    }

    fn search(&self, board: &BoardState, depth: u8, moves: &[ChessMove]) -> MoveGenResult<SearchResult> {
        let config = SearchConfig { depth, ..self.config };
        MinimaxSearch::new(&self.move_generator, &self.scorer, config).search_root(board, moves)
    }

    fn choose_from_tokens(
        &self,
        board: &BoardState,
        tokens: &[String],
        depth: u8,
    ) -> Result<EngineOutput, EngineError> {
        match tokens {
            [] => return Err(EngineError::NoCandidates),
            [only] => {
                return Ok(EngineOutput {
                    best_index: Some(0),
                    best_move: Some(only.clone()),
                    info_lines: vec!["info string single candidate, search skipped".to_string()],
                    ..EngineOutput::default()
                });
            }
            _ => {}
        }

        // Unresolvable tokens drop out but keep their slot in the caller's list.
        let mut indices = Vec::with_capacity(tokens.len());
        let mut moves = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            match resolve_candidate(board, token) {
                Ok(Some(mv)) => {
                    trace!(index, token = %token, mv = %mv.to_coordinate(), "candidate resolved");
                    indices.push(index);
                    moves.push(mv);
                }
                Ok(None) => debug!(index, token = %token, "skipping candidate that leaves the king in check"),
                Err(err) => debug!(index, token = %token, %err, "skipping unresolvable candidate"),
            }
        }

        if moves.is_empty() {
            return Err(EngineError::NoResolvableCandidates { count: tokens.len() });
        }

        let result = self.search(board, depth, &moves)?;
        let best_index = result.best_index.map(|i| indices[i]);
        Ok(EngineOutput {
            best_index,
            best_move: best_index.map(|i| tokens[i].clone()),
            score: result.best_score,
            nodes: result.nodes,
            info_lines: vec![summary_line(depth, &result)],
        })
    }

    fn choose_from_legal_moves(&self, board: &BoardState, depth: u8) -> Result<EngineOutput, EngineError> {
        let moves = self.move_generator.generate_legal_moves(board)?;
        let result = self.search(board, depth, &moves)?;
        let best_move = match result.best_move {
            Some(mv) => Some(move_to_san(board, &mv)?),
            None => None,
        };
        Ok(EngineOutput {
            best_index: result.best_index,
            best_move,
            score: result.best_score,
            nodes: result.nodes,
            info_lines: vec![summary_line(depth, &result)],
        })
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn choose_move(&mut self, board: &BoardState, params: &GoParams) -> Result<EngineOutput, EngineError> {
        let depth = resolve_depth(params, self.config.depth);
        match &params.candidate_moves {
            Some(tokens) => self.choose_from_tokens(board, tokens, depth),
            None => self.choose_from_legal_moves(board, depth),
        }
    }
}

/// `Ok(None)` when the token resolves but the move is illegal.
fn resolve_candidate(board: &BoardState, token: &str) -> MoveGenResult<Option<ChessMove>> {
    let parsed = parse_san_token(token)?;
    let mv = resolve_token(board, &parsed)?;
    Ok(filter_legal(board, &[mv])?.first().copied())
}

fn summary_line(depth: u8, result: &SearchResult) -> String {
    format!(
        "info depth {} score cp {} nodes {}",
        depth, result.best_score, result.nodes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> BoardState {
        BoardState::from_fen(fen).expect("FEN should parse")
    }

    fn candidates(tokens: &[&str], timeout: u64) -> GoParams {
        GoParams {
            timeout: Some(timeout),
            candidate_moves: Some(tokens.iter().map(|t| t.to_string()).collect()),
            ..GoParams::default()
        }
    }

    #[test]
    fn single_candidate_is_returned_without_search() {
        let mut engine = MinimaxEngine::default();
        let out = engine
            .choose_move(&BoardState::new_game(), &candidates(&["Zz9"], 1))
            .expect("single candidate should be accepted");
        assert_eq!(out.best_index, Some(0));
        assert_eq!(out.nodes, 0);
    }

    #[test]
    fn empty_candidate_list_is_an_error() {
        let mut engine = MinimaxEngine::default();
        let err = engine
            .choose_move(&BoardState::new_game(), &candidates(&[], 1))
            .expect_err("no candidates");
        assert_eq!(err, EngineError::NoCandidates);
    }

    #[test]
    fn picks_the_mating_candidate() {
        let mut engine = MinimaxEngine::default();
        let position = board("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let out = engine
            .choose_move(&position, &candidates(&["Kf1", "Ra7", "Ra8#", "h3"], 1))
            .expect("engine should choose");
        assert_eq!(out.best_index, Some(2));
        assert_eq!(out.best_move.as_deref(), Some("Ra8#"));
    }

    #[test]
    fn picks_the_free_queen() {
        let mut engine = MinimaxEngine::default();
        let position = board("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 30");
        let out = engine
            .choose_move(&position, &candidates(&["Ke2", "Rd3", "Rxd5", "Kf1"], 2))
            .expect("engine should choose");
        assert_eq!(out.best_index, Some(2));
    }

    #[test]
    fn unresolvable_candidates_keep_their_slots() {
        let mut engine = MinimaxEngine::default();
        let position = board("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 30");
        // "Nf3" has no knight behind it and "Rd1??" is outside the alphabet.
        let out = engine
            .choose_move(&position, &candidates(&["Nf3", "Rd1??", "Ke2", "Rxd5"], 1))
            .expect("engine should choose");
        assert_eq!(out.best_index, Some(3));
    }

    #[test]
    fn only_unresolvable_candidates_is_an_error() {
        let mut engine = MinimaxEngine::default();
        let err = engine
            .choose_move(&BoardState::new_game(), &candidates(&["Nf6", "e5", "Qxd8"], 1))
            .expect_err("nothing resolves for white");
        assert_eq!(err, EngineError::NoResolvableCandidates { count: 3 });
    }

    #[test]
    fn blocked_castles_are_not_candidates() {
        let mut engine = MinimaxEngine::default();
        let err = engine
            .choose_move(&BoardState::new_game(), &candidates(&["O-O", "O-O-O"], 1))
            .expect_err("both castles are blocked");
        assert_eq!(err, EngineError::NoResolvableCandidates { count: 2 });
    }

    #[test]
    fn castle_through_an_attacked_square_is_skipped() {
        let mut engine = MinimaxEngine::default();
        // The f8 rook covers f1, so only the queenside castle is legal.
        let position = board("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let out = engine
            .choose_move(&position, &candidates(&["O-O", "O-O-O"], 1))
            .expect("engine should choose");
        assert_eq!(out.best_index, Some(1));
        assert_eq!(out.best_move.as_deref(), Some("O-O-O"));
    }

    #[test]
    fn candidates_leaving_the_king_in_check_are_skipped() {
        let mut engine = MinimaxEngine::default();
        // The e2 rook is pinned against the king by the e8 queen.
        let position = board("4q1k1/8/8/8/8/8/4R3/4K3 w - - 0 30");
        let out = engine
            .choose_move(&position, &candidates(&["Ra2", "Rxe8+"], 1))
            .expect("engine should choose");
        assert_eq!(out.best_index, Some(1));
    }

    #[test]
    fn generated_moves_are_used_without_candidates() {
        let mut engine = MinimaxEngine::default();
        let position = board("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let params = GoParams {
            depth: Some(1),
            ..GoParams::default()
        };
        let out = engine.choose_move(&position, &params).expect("engine should choose");
        assert_eq!(out.best_move.as_deref(), Some("Ra8+"));
        assert!(out.best_index.is_some());
    }

    #[test]
    fn checkmated_side_has_no_move() {
        let mut engine = MinimaxEngine::default();
        let mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let out = engine
            .choose_move(&mated, &GoParams::default())
            .expect("search should run");
        assert_eq!(out.best_index, None);
        assert_eq!(out.best_move, None);
    }
}
