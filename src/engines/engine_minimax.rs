use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_config::MinimaxConfig;
use crate::engines::engine_trait::ChessAi;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::MaterialScorer;
use crate::search::minimax::choose_minimax_move;
use crate::search::progress::ProgressIndicator;

/// Fixed-depth minimax that breaks ties between equally scored root moves at
/// random, so a human opponent cannot learn a fixed reply.
pub struct MinimaxAi {
    config: MinimaxConfig,
    scorer: MaterialScorer,
    rng: StdRng,
}

impl MinimaxAi {
    pub fn new(config: MinimaxConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            config,
            scorer: MaterialScorer,
            rng,
        }
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }
}

impl ChessAi for MinimaxAi {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn calculate_recommended_move(
        &mut self,
        favored: Color,
        game: &mut ChessGame,
        progress: &mut dyn ProgressIndicator,
    ) -> Option<ChessMove> {
        progress.begin();
        let picked = choose_minimax_move(
            &self.config,
            &self.scorer,
            favored,
            game,
            &mut self.rng,
            progress,
        );
        progress.end();
        picked
    }
}
