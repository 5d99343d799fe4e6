//! Knight jumps to the eight L-shaped offsets.

use crate::game_state::board_location::Location;
use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::moves::ray_moves::step_or_capture;

pub fn gather_knight_moves(
    game: &ChessGame,
    source: Location,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    for offset in KNIGHT_OFFSETS {
        step_or_capture(game.board(), source, source + offset, color, out);
    }
}
