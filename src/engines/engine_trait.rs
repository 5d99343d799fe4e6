//! Engine abstraction layer.
//!
//! Every AI recommends a move for a given color on a live game. The game is
//! borrowed mutably because searches explore by pushing and popping moves,
//! and it must come back exactly as it was handed in.

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::search::progress::ProgressIndicator;

pub trait ChessAi: Send {
    fn name(&self) -> &str;

    /// Best move for `favored`, or `None` when it has no legal move or the
    /// search was cancelled through `progress`.
    fn calculate_recommended_move(
        &mut self,
        favored: Color,
        game: &mut ChessGame,
        progress: &mut dyn ProgressIndicator,
    ) -> Option<ChessMove>;
}
