//! Crate root module declarations for the Ivory Chess engine.
//!
//! The board model and its reversible move stack live in `game_state` and
//! `moves`; legality, search and the computer players build on top of them.
//! `session` is the state a host keeps between turns, and `utils` holds
//! persistence and developer tooling.

pub mod game_state {
    pub mod board_location;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod chess_move;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod ray_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod mcts;
    pub mod mcts_tree;
    pub mod minimax;
    pub mod progress;
    pub mod threading;
}

pub mod engines {
    pub mod engine_config;
    pub mod engine_mcts;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod game_session;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod fen_parser;
    pub mod game_file;
    pub mod long_algebraic;
    pub mod render_game_state;
}

pub mod chess_errors;
