//! Command-line front end: pick the best of a list of candidate moves.
//!
//! Prints the 0-based index of the chosen candidate on stdout, or `-1` when
//! the position or the candidate list cannot be used.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use chess_move_selector::board_state::board_state::BoardState;
use chess_move_selector::chess_errors::EngineError;
use chess_move_selector::engines::engine_minimax::MinimaxEngine;
use chess_move_selector::engines::engine_trait::{Engine, GoParams};
use chess_move_selector::move_generation::legal_filter::{generate_legal_moves, moves_to_token_stream};
use chess_move_selector::search::board_scoring::PositionalScorer;
use chess_move_selector::search::minimax::SearchConfig;
use chess_move_selector::utils::render_board_state::render_board_state;

#[derive(Debug, Parser)]
#[command(name = "chess_move_selector", version, about = "Choose the strongest candidate move for a chess position")]
struct Cli {
    /// Position in Forsyth-Edwards Notation.
    fen: String,

    /// Space-separated candidate moves in algebraic notation, e.g. "e4 Nf3 O-O".
    #[arg(required_unless_present = "legal")]
    moves: Option<String>,

    /// Time budget in seconds; 1 or less searches one ply below each candidate.
    #[arg(default_value_t = 2)]
    timeout: u64,

    /// Search depth below each candidate, overriding the timeout.
    #[arg(long)]
    depth: Option<u8>,

    /// Resolve pending captures at the search horizon.
    #[arg(long)]
    quiescence: bool,

    /// Print the board to stderr before searching.
    #[arg(long)]
    show_board: bool,

    /// Print the legal moves of the position and exit.
    #[arg(long)]
    legal: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "move selection failed");
            println!("-1");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, EngineError> {
    let board = BoardState::from_fen(&cli.fen)?;
    if cli.show_board {
        eprintln!("{}", render_board_state(&board));
    }

    if cli.legal {
        let moves = generate_legal_moves(&board)?;
        return Ok(moves_to_token_stream(&board, &moves)?);
    }

    let candidates = cli
        .moves
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_owned)
        .collect();

    let config = SearchConfig {
        quiescence: cli.quiescence,
        ..SearchConfig::default()
    };
    let mut engine = MinimaxEngine::new(config, PositionalScorer::default());
    let params = GoParams {
        depth: cli.depth,
        timeout: Some(cli.timeout),
        candidate_moves: Some(candidates),
    };

    let output = engine.choose_move(&board, &params)?;
    for line in &output.info_lines {
        debug!(engine = engine.name(), "{line}");
    }

    Ok(output
        .best_index
        .map_or_else(|| "-1".to_string(), |index| index.to_string()))
}
