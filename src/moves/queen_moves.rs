//! Queen moves: rook and bishop rays combined.

use crate::game_state::board_location::Location;
use crate::game_state::chess_rules::ALL_DIRECTIONS;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::moves::ray_moves::cast_rays;

pub fn gather_queen_moves(
    game: &ChessGame,
    source: Location,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    cast_rays(game.board(), source, color, &ALL_DIRECTIONS, 7, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, PieceKind};

    #[test]
    fn central_queen_has_twenty_seven_moves() {
        let mut game = ChessGame::new_empty();
        let d4 = Location::new(3, 3);
        game.set_square_occupant(d4, Some(Piece::new(PieceKind::Queen, Color::White)));
        let mut out = Vec::new();
        gather_queen_moves(&game, d4, Color::White, &mut out);
        assert_eq!(out.len(), 27);
    }
}
