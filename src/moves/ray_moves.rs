//! Shared stepping logic for ray and jump pieces.

use crate::game_state::board_location::Location;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::Board;
use crate::moves::chess_move::ChessMove;

/// Emits a Travel or Capture onto `target` for a piece of `color`.
/// Returns true when a ray may keep stepping past `target`.
#[inline]
pub fn step_or_capture(
    board: &Board,
    source: Location,
    target: Location,
    color: Color,
    out: &mut Vec<ChessMove>,
) -> bool {
    if !target.is_valid() {
        return false;
    }
    match board.occupant(target) {
        None => {
            out.push(ChessMove::travel(source, target));
            true
        }
        Some(occupant) => {
            if occupant.color != color {
                out.push(ChessMove::capture(source, target));
            }
            false
        }
    }
}

/// Casts each direction from `source` until blocked, off-board, or
/// `max_length` steps have been taken.
pub fn cast_rays(
    board: &Board,
    source: Location,
    color: Color,
    directions: &[Location],
    max_length: i8,
    out: &mut Vec<ChessMove>,
) {
    for &direction in directions {
        for step in 1..=max_length {
            if !step_or_capture(board, source, source + direction * step, color, out) {
                break;
            }
        }
    }
}
