//! Depth-limited minimax with alpha-beta pruning and an optional capture-only
//! quiescence extension.
//!
//! Scores stay in the root side's perspective for the whole tree: the
//! `maximizing` flag says whether the side to move at a node is the root side.
//! Quiescence works the other way round (negamax, side to move) and is
//! converted at the horizon.

use tracing::{debug, trace};

use crate::board_state::board_state::BoardState;
use crate::chess_errors::MoveGenResult;
use crate::move_generation::attack_detector::is_king_attacked;
use crate::move_generation::move_apply::play_move;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};

/// Open bound of the alpha-beta window; strictly beyond any mate score.
pub const INFINITY_SCORE: i32 = MATE_SCORE + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below each root move.
    pub depth: u8,
    /// Resolve captures at the horizon instead of scoring it directly.
    pub quiescence: bool,
    pub max_quiescence_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            quiescence: false,
            max_quiescence_depth: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Index into the candidate slice handed to [`MinimaxSearch::search_root`].
    pub best_index: Option<usize>,
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub nodes: u64,
}

pub struct MinimaxSearch<'a, G: MoveGenerator, S: BoardScorer> {
    generator: &'a G,
    scorer: &'a S,
    config: SearchConfig,
    nodes: u64,
}

impl<'a, G: MoveGenerator, S: BoardScorer> MinimaxSearch<'a, G, S> {
    pub fn new(generator: &'a G, scorer: &'a S, config: SearchConfig) -> Self {
        Self {
            generator,
            scorer,
            config,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Value of `board` for the root side. `maximizing` is true when the side
    /// to move in `board` is the root side.
    pub fn minimax(
        &mut self,
        board: &BoardState,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> MoveGenResult<i32> {
        self.minimax_at(board, depth, alpha, beta, maximizing, 0)
    }

    fn minimax_at(
        &mut self,
        board: &BoardState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ply: u8,
    ) -> MoveGenResult<i32> {
        self.nodes += 1;

        let moves = self.generator.generate_legal_moves(board)?;
        if moves.is_empty() {
            return Ok(terminal_score(board, ply, maximizing));
        }

        if depth == 0 {
            return self.horizon_score(board, alpha, beta, maximizing);
        }

        if maximizing {
            let mut best = -INFINITY_SCORE;
            for mv in &moves {
                let child = play_move(board, mv)?;
                let score = self.minimax_at(&child, depth - 1, alpha, beta, false, ply.saturating_add(1))?;
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        } else {
            let mut best = INFINITY_SCORE;
            for mv in &moves {
                let child = play_move(board, mv)?;
                let score = self.minimax_at(&child, depth - 1, alpha, beta, true, ply.saturating_add(1))?;
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        }
    }

    fn horizon_score(&mut self, board: &BoardState, alpha: i32, beta: i32, maximizing: bool) -> MoveGenResult<i32> {
        match (self.config.quiescence, maximizing) {
            (false, true) => Ok(self.scorer.score(board)),
            (false, false) => Ok(-self.scorer.score(board)),
            (true, true) => self.quiescence_at(board, alpha, beta, 0),
            (true, false) => Ok(-self.quiescence_at(board, -beta, -alpha, 0)?),
        }
    }

    /// Capture-only extension, scored for the side to move (fail-hard).
    pub fn quiescence(&mut self, board: &BoardState, alpha: i32, beta: i32) -> MoveGenResult<i32> {
        self.quiescence_at(board, alpha, beta, 0)
    }

    fn quiescence_at(&mut self, board: &BoardState, mut alpha: i32, beta: i32, qply: u8) -> MoveGenResult<i32> {
        self.nodes += 1;

        let stand_pat = self.scorer.score(board);
        if stand_pat >= beta {
            return Ok(beta);
        }
        alpha = alpha.max(stand_pat);

        if qply >= self.config.max_quiescence_depth {
            return Ok(alpha);
        }

        for mv in self.generator.generate_legal_captures(board)? {
            let child = play_move(board, &mv)?;
            let score = -self.quiescence_at(&child, -beta, -alpha, qply + 1)?;
            if score >= beta {
                return Ok(beta);
            }
            alpha = alpha.max(score);
        }

        Ok(alpha)
    }

    /// Score every candidate in order and keep the first strictly best one.
    /// With no candidates the result carries the root's own terminal score.
    pub fn search_root(&mut self, board: &BoardState, candidates: &[ChessMove]) -> MoveGenResult<SearchResult> {
        self.nodes = 0;

        if candidates.is_empty() {
            let best_score = self.minimax_at(board, 0, -INFINITY_SCORE, INFINITY_SCORE, true, 0)?;
            return Ok(SearchResult {
                best_score,
                nodes: self.nodes,
                ..SearchResult::default()
            });
        }

        let mut alpha = -INFINITY_SCORE;
        let mut result = SearchResult {
            best_score: -INFINITY_SCORE,
            ..SearchResult::default()
        };

        for (index, mv) in candidates.iter().enumerate() {
            let child = play_move(board, mv)?;
            let score = self.minimax_at(&child, self.config.depth, alpha, INFINITY_SCORE, false, 1)?;
            trace!(index, mv = %mv.to_coordinate(), score, "root candidate scored");

            if score > result.best_score {
                result.best_score = score;
                result.best_index = Some(index);
                result.best_move = Some(*mv);
            }
            alpha = alpha.max(score);
        }

        result.nodes = self.nodes;
        debug!(
            depth = self.config.depth,
            best_index = ?result.best_index,
            score = result.best_score,
            nodes = result.nodes,
            "root search finished"
        );
        Ok(result)
    }

    /// Search every legal move of `board`.
    pub fn search_legal_moves(&mut self, board: &BoardState) -> MoveGenResult<SearchResult> {
        let moves = self.generator.generate_legal_moves(board)?;
        self.search_root(board, &moves)
    }
}

/// Mate or stalemate, scored for the root side.
fn terminal_score(board: &BoardState, ply: u8, maximizing: bool) -> i32 {
    if !is_king_attacked(board) {
        return 0;
    }
    let mate = MATE_SCORE - i32::from(ply);
    if maximizing {
        -mate
    } else {
        mate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::MoveGenerationError;
    use crate::move_generation::legal_filter::LegalMoveGenerator;
    use crate::search::board_scoring::{MaterialScorer, PositionalScorer};

    fn board(fen: &str) -> BoardState {
        BoardState::from_fen(fen).expect("FEN should parse")
    }

    struct FlatScorer;

    impl BoardScorer for FlatScorer {
        fn score(&self, _board: &BoardState) -> i32 {
            0
        }
    }

    struct FailingGenerator;

    impl MoveGenerator for FailingGenerator {
        fn generate_legal_moves(&self, _board: &BoardState) -> MoveGenResult<Vec<ChessMove>> {
            Err(MoveGenerationError::InvalidState {
                message: "generator offline".to_string(),
            })
        }

        fn generate_legal_captures(&self, board: &BoardState) -> MoveGenResult<Vec<ChessMove>> {
            self.generate_legal_moves(board)
        }
    }

    /// Reference minimax without pruning.
    fn plain_minimax<G: MoveGenerator, S: BoardScorer>(
        generator: &G,
        scorer: &S,
        board: &BoardState,
        depth: u8,
        maximizing: bool,
        ply: u8,
    ) -> i32 {
        let moves = generator.generate_legal_moves(board).expect("generation should succeed");
        if moves.is_empty() {
            return terminal_score(board, ply, maximizing);
        }
        if depth == 0 {
            let s = scorer.score(board);
            return if maximizing { s } else { -s };
        }
        let scores = moves.iter().map(|mv| {
            let child = play_move(board, mv).expect("legal move should apply");
            plain_minimax(generator, scorer, &child, depth - 1, !maximizing, ply + 1)
        });
        if maximizing {
            scores.max().unwrap_or(0)
        } else {
            scores.min().unwrap_or(0)
        }
    }

    #[test]
    fn depth_zero_is_the_static_evaluation() {
        let scorer = PositionalScorer::default();
        let position = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let before = position;

        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &scorer, SearchConfig::default());
        let value = search
            .minimax(&position, 0, -INFINITY_SCORE, INFINITY_SCORE, true)
            .expect("search should run");

        assert_eq!(value, scorer.score(&position));
        assert_eq!(position, before);
    }

    #[test]
    fn checkmated_side_scores_minus_mate() {
        let mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &MaterialScorer, SearchConfig::default());

        let value = search
            .minimax(&mated, 2, -INFINITY_SCORE, INFINITY_SCORE, true)
            .expect("search should run");
        assert_eq!(value, -MATE_SCORE);

        let result = search.search_legal_moves(&mated).expect("search should run");
        assert_eq!(result.best_index, None);
        assert_eq!(result.best_score, -MATE_SCORE);
    }

    #[test]
    fn stalemate_scores_zero() {
        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &MaterialScorer, SearchConfig::default());
        let value = search
            .minimax(&stalemate, 3, -INFINITY_SCORE, INFINITY_SCORE, true)
            .expect("search should run");
        assert_eq!(value, 0);
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        let position = board("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let config = SearchConfig {
            depth: 1,
            ..SearchConfig::default()
        };
        let scorer = PositionalScorer::default();
        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &scorer, config);

        let result = search.search_legal_moves(&position).expect("search should run");
        let best = result.best_move.expect("a move should be chosen");
        assert_eq!(best.to_coordinate(), "a1a8");
        assert_eq!(result.best_score, MATE_SCORE - 1);
        assert!(result.nodes > 0);
    }

    #[test]
    fn prefers_the_shorter_mate() {
        // Ra8 mates at once; any slower line can at best mate a ply later.
        let position = board("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let config = SearchConfig {
            depth: 3,
            ..SearchConfig::default()
        };
        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &MaterialScorer, config);
        let result = search.search_legal_moves(&position).expect("search should run");
        assert_eq!(result.best_score, MATE_SCORE - 1);
    }

    #[test]
    fn pruning_does_not_change_the_value() {
        let position = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &MaterialScorer, SearchConfig::default());

        let pruned = search
            .minimax(&position, 2, -INFINITY_SCORE, INFINITY_SCORE, true)
            .expect("search should run");
        let pruned_nodes = search.nodes();
        let reference = plain_minimax(&LegalMoveGenerator, &MaterialScorer, &position, 2, true, 0);

        assert_eq!(pruned, reference);
        assert!(pruned_nodes < 1 + 48 + 2039);
    }

    #[test]
    fn ties_keep_the_earliest_candidate() {
        let start = BoardState::new_game();
        let moves = LegalMoveGenerator
            .generate_legal_moves(&start)
            .expect("generation should succeed");

        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &FlatScorer, SearchConfig::default());
        let result = search.search_root(&start, &moves).expect("search should run");
        assert_eq!(result.best_index, Some(0));
        assert_eq!(result.best_score, 0);
    }

    #[test]
    fn wins_a_hanging_queen() {
        let position = board("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 30");
        let config = SearchConfig {
            depth: 1,
            ..SearchConfig::default()
        };
        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &MaterialScorer, config);
        let result = search.search_legal_moves(&position).expect("search should run");
        assert_eq!(result.best_move.map(|mv| mv.to_coordinate()), Some("d2d5".to_string()));
        assert_eq!(result.best_score, 500);
    }

    #[test]
    fn quiescence_resolves_pending_captures() {
        let scorer = MaterialScorer;
        let mut search = MinimaxSearch::new(&LegalMoveGenerator, &scorer, SearchConfig::default());

        let quiet = BoardState::new_game();
        assert_eq!(
            search
                .quiescence(&quiet, -INFINITY_SCORE, INFINITY_SCORE)
                .expect("search should run"),
            0
        );

        let hanging = board("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 30");
        let stand_pat = scorer.score(&hanging);
        let resolved = search
            .quiescence(&hanging, -INFINITY_SCORE, INFINITY_SCORE)
            .expect("search should run");
        assert_eq!(stand_pat, -400);
        assert_eq!(resolved, 500);
    }

    #[test]
    fn quiescence_at_the_horizon_sees_recaptures() {
        // Qxd5 wins a pawn on material alone but loses the queen to exd5.
        let position = board("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 30");
        let shallow = SearchConfig {
            depth: 0,
            quiescence: false,
            ..SearchConfig::default()
        };
        let deep = SearchConfig {
            quiescence: true,
            ..shallow
        };

        let qxd5 = LegalMoveGenerator
            .generate_legal_moves(&position)
            .expect("generation should succeed")
            .into_iter()
            .position(|mv| mv.to_coordinate() == "d1d5")
            .expect("Qxd5 should be legal");

        let moves = LegalMoveGenerator
            .generate_legal_moves(&position)
            .expect("generation should succeed");

        let mut naive = MinimaxSearch::new(&LegalMoveGenerator, &MaterialScorer, shallow);
        assert_eq!(naive.search_root(&position, &moves).expect("search").best_index, Some(qxd5));

        let mut careful = MinimaxSearch::new(&LegalMoveGenerator, &MaterialScorer, deep);
        assert_ne!(careful.search_root(&position, &moves).expect("search").best_index, Some(qxd5));
    }

    #[test]
    fn generator_errors_propagate() {
        let mut search = MinimaxSearch::new(&FailingGenerator, &MaterialScorer, SearchConfig::default());
        let err = search
            .search_legal_moves(&BoardState::new_game())
            .expect_err("failing generator should surface");
        assert!(matches!(err, MoveGenerationError::InvalidState { .. }));
    }
}
