//! Monte Carlo Tree Search.
//!
//! Each iteration selects down the tree by UCB, expands a leaf that has
//! already been visited, rolls the resulting position out with random legal
//! moves and backpropagates the score. Selection and expansion push moves onto
//! the live game; backpropagation pops exactly as many again, so the move
//! stack depth is unchanged after every iteration.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::chess_errors::ChessResult;
use crate::engines::engine_config::MctsConfig;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{terminal_score, BoardScorer};
use crate::search::mcts_tree::{NodeId, SearchTree, ROOT};
use crate::search::progress::ProgressIndicator;
use crate::search::threading::RolloutPool;

/// What a rollout needs besides the position, shareable with worker threads.
#[derive(Clone)]
pub struct RolloutSettings {
    pub favored: Color,
    pub evaluation_threshold: i32,
    pub max_plies: u32,
    pub scorer: Arc<dyn BoardScorer>,
}

impl RolloutSettings {
    pub fn from_config(config: &MctsConfig, favored: Color, scorer: Arc<dyn BoardScorer>) -> Self {
        Self {
            favored,
            evaluation_threshold: config.evaluation_threshold,
            max_plies: config.max_rollout_plies,
            scorer,
        }
    }
}

/// Plays random legal moves from the current position and scores the result
/// for the favored color.
///
/// Stops at checkmate or stalemate, once the evaluation leaves
/// `[-threshold, threshold]`, when two or fewer pieces remain, or after
/// `max_plies` moves. Every pushed move is popped before returning.
pub fn rollout<R: Rng + ?Sized>(
    game: &mut ChessGame,
    to_move: Color,
    settings: &RolloutSettings,
    rng: &mut R,
) -> f64 {
    let favored = settings.favored;
    let mut side = to_move;
    let mut pushed = 0u32;

    let score = loop {
        let (result, moves) = game.generate_all_legal_moves_for_color(side);
        if let Some(score) = terminal_score(result, favored, side) {
            break score;
        }
        let evaluation = settings.scorer.score(favored, game);
        if evaluation.abs() > settings.evaluation_threshold
            || game.get_num_pieces_on_board() <= 2
            || pushed >= settings.max_plies
        {
            break evaluation;
        }
        let Some(mv) = moves.choose(rng) else {
            break evaluation;
        };
        game.push_move(mv.clone());
        pushed += 1;
        side = side.opposite();
    };

    for _ in 0..pushed {
        game.pop_move();
    }
    f64::from(score)
}

#[derive(Debug, Clone, Copy)]
enum Budget {
    Iterations(u32),
    Time(Duration),
    Unset,
}

pub struct MctsSearch<'a> {
    config: &'a MctsConfig,
    settings: RolloutSettings,
    pool: Option<&'a RolloutPool>,
}

impl<'a> MctsSearch<'a> {
    pub fn new(
        config: &'a MctsConfig,
        settings: RolloutSettings,
        pool: Option<&'a RolloutPool>,
    ) -> Self {
        Self {
            config,
            settings,
            pool,
        }
    }

    fn budget(&self) -> ChessResult<Budget> {
        self.config.validate()?;
        Ok(match (self.config.max_iterations, self.config.time_budget()?) {
            (Some(iterations), _) => Budget::Iterations(iterations),
            (None, Some(limit)) => Budget::Time(limit),
            (None, None) => Budget::Unset,
        })
    }

    /// Runs the search and returns the root move with the highest total
    /// score. `None` when the config is invalid, when cancelled, when no
    /// iteration ran, or when the favored color has no legal moves.
    pub fn run<R: Rng + ?Sized>(
        &self,
        game: &mut ChessGame,
        rng: &mut R,
        progress: &mut dyn ProgressIndicator,
    ) -> Option<ChessMove> {
        let budget = match self.budget() {
            Ok(budget) => budget,
            Err(err) => {
                warn!(%err, "mcts search refused");
                return None;
            }
        };
        let mut tree = SearchTree::new();
        let start = Instant::now();
        let mut iterations = 0u32;

        loop {
            let fraction = match budget {
                Budget::Iterations(limit) => {
                    if iterations >= limit {
                        break;
                    }
                    iterations as f32 / limit as f32
                }
                Budget::Time(limit) => {
                    let elapsed = start.elapsed();
                    if elapsed >= limit {
                        break;
                    }
                    elapsed.as_secs_f32() / limit.as_secs_f32()
                }
                Budget::Unset => break,
            };
            if !progress.update(fraction) {
                warn!(iterations, "mcts search cancelled");
                return None;
            }

            let depth_before = game.get_num_moves();
            self.iterate(&mut tree, game, rng);
            debug_assert_eq!(game.get_num_moves(), depth_before);
            iterations += 1;
        }

        let best = tree.best_root_child()?;
        let node = tree.node(best);
        debug!(
            iterations,
            nodes = tree.len(),
            best_total = node.total_score,
            best_visits = node.visits,
            "mcts search finished"
        );
        tree.take_move(best)
    }

    fn iterate<R: Rng + ?Sized>(&self, tree: &mut SearchTree, game: &mut ChessGame, rng: &mut R) {
        let favored = self.settings.favored;
        let exploration = self.config.exploration_constant;
        let mut node = ROOT;
        let mut to_move = favored;

        while !tree.node(node).children.is_empty() {
            let Some(child) = tree.select_child(node, exploration, to_move != favored) else {
                break;
            };
            push_node_move(tree, child, game);
            node = child;
            to_move = to_move.opposite();
        }

        let score = if tree.node(node).visits > 0 || node == ROOT {
            let (result, moves) = game.generate_all_legal_moves_for_color(to_move);
            match terminal_score(result, favored, to_move) {
                Some(score) => f64::from(score),
                None => {
                    let mut last = node;
                    for mv in moves {
                        last = tree.add_child(node, mv);
                    }
                    push_node_move(tree, last, game);
                    node = last;
                    to_move = to_move.opposite();
                    self.rollout_score(game, to_move, rng)
                }
            }
        } else {
            self.rollout_score(game, to_move, rng)
        };

        let depth = tree.backpropagate(node, score);
        trace!(node, depth, score, "mcts iteration");
        for _ in 0..depth {
            game.pop_move();
        }
    }

    fn rollout_score<R: Rng + ?Sized>(
        &self,
        game: &mut ChessGame,
        to_move: Color,
        rng: &mut R,
    ) -> f64 {
        if let Some(pool) = self.pool {
            if let Some(average) = pool.evaluate(game, to_move, rng) {
                return average;
            }
        }
        rollout(game, to_move, &self.settings, rng)
    }
}

fn push_node_move(tree: &SearchTree, id: NodeId, game: &mut ChessGame) {
    if let Some(mv) = &tree.node(id).mv {
        game.push_move(mv.clone());
    }
}
