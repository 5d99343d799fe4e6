//! Fixed-depth minimax with optional alpha-beta pruning.
//!
//! The search walks the one live game by pushing and popping moves. Each
//! child is searched against its parent's best score so far and stops early
//! once it can no longer beat it. Cutoffs use strict comparisons, so a child
//! whose value equals the parent's best is always exact; the root depends on
//! that to collect every move tied for the best score.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::engines::engine_config::MinimaxConfig;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{terminal_score, BoardScorer};
use crate::search::progress::ProgressIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Goal {
    Maximize,
    Minimize,
}

impl Goal {
    fn flip(self) -> Self {
        match self {
            Goal::Maximize => Goal::Minimize,
            Goal::Minimize => Goal::Maximize,
        }
    }
}

/// Outcome of a completed root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEvaluation {
    pub best_score: i32,
    /// Every root move scoring `best_score`, in search order.
    pub tied_moves: Vec<ChessMove>,
    pub nodes: u64,
}

pub struct MinimaxSearch<'a> {
    config: &'a MinimaxConfig,
    scorer: &'a dyn BoardScorer,
    favored: Color,
    nodes: u64,
}

impl<'a> MinimaxSearch<'a> {
    pub fn new(config: &'a MinimaxConfig, scorer: &'a dyn BoardScorer, favored: Color) -> Self {
        Self {
            config,
            scorer,
            favored,
            nodes: 0,
        }
    }

    /// Scores every legal root move for the favored color.
    ///
    /// Returns `None` when the favored color has no legal moves or when
    /// `progress` cancels the search.
    pub fn evaluate_root(
        &mut self,
        game: &mut ChessGame,
        progress: &mut dyn ProgressIndicator,
    ) -> Option<RootEvaluation> {
        let depth_before = game.get_num_moves();
        let (_, mut moves) = game.generate_all_legal_moves_for_color(self.favored);
        if moves.is_empty() {
            return None;
        }
        sort_for_pruning(game, &mut moves);

        let total = moves.len();
        let mut best_score: Option<i32> = None;
        let mut tied_moves = Vec::new();

        for (index, mv) in moves.into_iter().enumerate() {
            game.push_move(mv);
            let score = self.evaluate(game, self.favored.opposite(), 1, Goal::Minimize, best_score);
            let mv = game.pop_move();

            match best_score {
                Some(best) if score < best => {}
                Some(best) if score == best => tied_moves.push(mv),
                _ => {
                    best_score = Some(score);
                    tied_moves.clear();
                    tied_moves.push(mv);
                }
            }

            if !progress.update((index + 1) as f32 / total as f32) {
                warn!(completed = index + 1, total, "minimax search cancelled");
                return None;
            }
        }
        debug_assert_eq!(game.get_num_moves(), depth_before);

        let best_score = best_score?;
        debug!(
            best_score,
            tied = tied_moves.len(),
            nodes = self.nodes,
            "minimax root evaluated"
        );
        Some(RootEvaluation {
            best_score,
            tied_moves,
            nodes: self.nodes,
        })
    }

    fn evaluate(
        &mut self,
        game: &mut ChessGame,
        to_move: Color,
        depth: u32,
        goal: Goal,
        super_score: Option<i32>,
    ) -> i32 {
        self.nodes += 1;
        if depth >= self.config.max_depth {
            return self.scorer.score(self.favored, game);
        }

        let (result, mut moves) = game.generate_all_legal_moves_for_color(to_move);
        if let Some(score) = terminal_score(result, self.favored, to_move) {
            return score;
        }
        sort_for_pruning(game, &mut moves);

        let mut best: Option<i32> = None;
        for mv in moves {
            game.push_move(mv);
            let score = self.evaluate(game, to_move.opposite(), depth + 1, goal.flip(), best);
            game.pop_move();

            let improves = match (goal, best) {
                (_, None) => true,
                (Goal::Maximize, Some(current)) => score > current,
                (Goal::Minimize, Some(current)) => score < current,
            };
            if improves {
                best = Some(score);
            }

            if self.config.alpha_beta_pruning {
                if let (Some(current), Some(bound)) = (best, super_score) {
                    let cannot_matter = match goal {
                        Goal::Maximize => current > bound,
                        Goal::Minimize => current < bound,
                    };
                    if cannot_matter {
                        break;
                    }
                }
            }
        }
        // A non-terminal position always has at least one move.
        best.unwrap_or_else(|| self.scorer.score(self.favored, game))
    }
}

/// Highest sort key first; stable so equal keys keep generation order.
fn sort_for_pruning(game: &ChessGame, moves: &mut [ChessMove]) {
    let board = game.board();
    moves.sort_by_cached_key(|mv| std::cmp::Reverse(mv.sort_key(board)));
}

/// Runs a root search and picks uniformly among the tied best moves.
pub fn choose_minimax_move<R: Rng + ?Sized>(
    config: &MinimaxConfig,
    scorer: &dyn BoardScorer,
    favored: Color,
    game: &mut ChessGame,
    rng: &mut R,
    progress: &mut dyn ProgressIndicator,
) -> Option<ChessMove> {
    let evaluation = MinimaxSearch::new(config, scorer, favored).evaluate_root(game, progress)?;
    evaluation.tied_moves.choose(rng).cloned()
}
