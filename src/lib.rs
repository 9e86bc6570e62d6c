//! Chess move-selection core.
//!
//! Given a position and a list of candidate moves in algebraic notation, the
//! crate resolves each token against the board, searches below it with
//! minimax and alpha-beta pruning, and reports which candidate scored best.
//! The board is a set of twelve bitboards; every square index uses
//! `rank * 8 + file` (a1 = 0).

pub mod chess_errors;

pub mod board_state {
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod moves {
    pub mod chess_move;
    pub mod pawn_moves;
    pub mod sliding_moves;
    pub mod step_moves;
}

pub mod move_generation {
    pub mod attack_detector;
    pub mod legal_filter;
    pub mod move_apply;
    pub mod move_generator;
    pub mod perft;
    pub mod pseudo_moves_bishop;
    pub mod pseudo_moves_king;
    pub mod pseudo_moves_knight;
    pub mod pseudo_moves_pawn;
    pub mod pseudo_moves_queen;
    pub mod pseudo_moves_rook;
    pub mod pseudo_moves_shared;
}

pub mod san {
    pub mod san_resolver;
    pub mod san_token;
    pub mod san_writer;
}

pub mod search {
    pub mod board_scoring;
    pub mod eval_config;
    pub mod game_phase;
    pub mod minimax;
    pub mod piece_square_tables;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_board_state;
}
