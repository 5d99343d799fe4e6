use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::engines::engine_config::MctsConfig;
use crate::engines::engine_trait::ChessAi;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};
use crate::search::mcts::{MctsSearch, RolloutSettings};
use crate::search::progress::ProgressIndicator;
use crate::search::threading::RolloutPool;

/// MCTS player. With `worker_threads > 0` each search spins up a rollout
/// pool that lives for the duration of that search only.
pub struct MctsAi {
    config: MctsConfig,
    scorer: Arc<dyn BoardScorer>,
    rng: StdRng,
}

impl MctsAi {
    pub fn new(config: MctsConfig) -> Self {
        Self::with_scorer(config, Arc::new(MaterialScorer))
    }

    pub fn with_scorer(config: MctsConfig, scorer: Arc<dyn BoardScorer>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { config, scorer, rng }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

impl ChessAi for MctsAi {
    fn name(&self) -> &str {
        "MCTS"
    }

    fn calculate_recommended_move(
        &mut self,
        favored: Color,
        game: &mut ChessGame,
        progress: &mut dyn ProgressIndicator,
    ) -> Option<ChessMove> {
        if let Err(err) = self.config.validate() {
            warn!(%err, "mcts config rejected, no move");
            return None;
        }
        let settings =
            RolloutSettings::from_config(&self.config, favored, Arc::clone(&self.scorer));
        let pool = if self.config.worker_threads > 0 {
            match RolloutPool::new(
                self.config.worker_threads,
                self.config.rollouts_per_worker,
                settings.clone(),
            ) {
                Ok(pool) => Some(pool),
                Err(err) => {
                    warn!(%err, "rollout pool unavailable, rolling out on this thread");
                    None
                }
            }
        } else {
            None
        };

        progress.begin();
        let picked = MctsSearch::new(&self.config, settings, pool.as_ref()).run(
            game,
            &mut self.rng,
            progress,
        );
        progress.end();
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::progress::NullProgress;

    #[test]
    fn recommends_a_legal_opening_move() {
        let mut ai = MctsAi::new(MctsConfig {
            max_iterations: Some(25),
            max_rollout_plies: 20,
            worker_threads: 2,
            seed: Some(17),
            ..MctsConfig::default()
        });
        let mut game = ChessGame::new_game();
        let mv = ai
            .calculate_recommended_move(Color::White, &mut game, &mut NullProgress)
            .expect("a move");
        let (_, legal) = game.generate_all_legal_moves_for_color(Color::White);
        assert!(legal.contains(&mv));
        assert_eq!(game, ChessGame::new_game());
    }

    #[test]
    fn invalid_configs_yield_no_move() {
        let huge_time = MctsConfig {
            max_iterations: None,
            max_time_seconds: Some(1e30),
            worker_threads: 2,
            seed: Some(5),
            ..MctsConfig::default()
        };
        let both_budgets = MctsConfig {
            max_iterations: Some(10),
            max_time_seconds: Some(0.5),
            seed: Some(5),
            ..MctsConfig::default()
        };
        for config in [huge_time, both_budgets] {
            let mut ai = MctsAi::new(config);
            let mut game = ChessGame::new_game();
            let mv = ai.calculate_recommended_move(Color::White, &mut game, &mut NullProgress);
            assert!(mv.is_none());
            assert_eq!(game, ChessGame::new_game());
        }
    }
}
