//! Bishop slides along diagonals.

use crate::game_state::board_location::Location;
use crate::game_state::chess_rules::DIAGONAL_DIRECTIONS;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::moves::ray_moves::cast_rays;

pub fn gather_bishop_moves(
    game: &ChessGame,
    source: Location,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    cast_rays(game.board(), source, color, &DIAGONAL_DIRECTIONS, 7, out);
}
