//! Static position evaluation.
//!
//! Search stays independent of the heuristic by scoring through the
//! `BoardScorer` trait; `MaterialScorer` is the baseline used by both AIs.

use crate::game_state::chess_types::{Color, GameResult};
use crate::game_state::chess_rules::{CHECKMATE_SCORE, STALEMATE_SCORE};
use crate::game_state::game_state::ChessGame;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `favored`: positive is good for it.
    fn score(&self, favored: Color, game: &ChessGame) -> i32;
}

/// Material plus a small centralization bonus per piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, favored: Color, game: &ChessGame) -> i32 {
        game.board()
            .occupied()
            .map(|(location, piece)| {
                let value = piece.score() + location.shortest_distance_to_edge();
                if piece.color == favored {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

/// Score of a finished game for `favored`, when `to_move` has no legal moves.
/// Stalemate is disfavored for both sides.
pub fn terminal_score(result: GameResult, favored: Color, to_move: Color) -> Option<i32> {
    match result {
        GameResult::CheckMate if to_move == favored => Some(-CHECKMATE_SCORE),
        GameResult::CheckMate => Some(CHECKMATE_SCORE),
        GameResult::StaleMate => Some(STALEMATE_SCORE),
        GameResult::None | GameResult::Check => None,
    }
}
