//! Uniform random legal-move chooser, used as a baseline opponent.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::engines::engine_trait::ChessAi;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::search::progress::ProgressIndicator;

pub struct RandomAi {
    rng: StdRng,
}

impl RandomAi {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl Default for RandomAi {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ChessAi for RandomAi {
    fn name(&self) -> &str {
        "Random"
    }

    fn calculate_recommended_move(
        &mut self,
        favored: Color,
        game: &mut ChessGame,
        progress: &mut dyn ProgressIndicator,
    ) -> Option<ChessMove> {
        progress.begin();
        let (_, legal_moves) = game.generate_all_legal_moves_for_color(favored);
        debug!(legal_moves = legal_moves.len(), "random ai choosing");
        let picked = legal_moves.choose(&mut self.rng).cloned();
        let proceed = progress.update(1.0);
        progress.end();
        picked.filter(|_| proceed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::progress::NullProgress;
    use crate::utils::fen_parser::parse_placement;

    #[test]
    fn picks_a_legal_move_reproducibly() {
        let mut game = ChessGame::new_game();
        let first = RandomAi::new(Some(42))
            .calculate_recommended_move(Color::White, &mut game, &mut NullProgress)
            .expect("a move");
        let second = RandomAi::new(Some(42))
            .calculate_recommended_move(Color::White, &mut game, &mut NullProgress)
            .expect("a move");
        assert_eq!(first, second);
        let (_, legal) = game.generate_all_legal_moves_for_color(Color::White);
        assert!(legal.contains(&first));
    }

    #[test]
    fn mated_side_gets_no_move() {
        let mut game = parse_placement("R5k1/5ppp/8/8/8/8/8/6K1").expect("placement");
        let mv = RandomAi::default().calculate_recommended_move(
            Color::Black,
            &mut game,
            &mut NullProgress,
        );
        assert!(mv.is_none());
    }
}
