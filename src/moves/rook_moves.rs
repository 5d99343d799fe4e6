//! Rook slides along ranks and files.

use crate::game_state::board_location::Location;
use crate::game_state::chess_rules::ORTHOGONAL_DIRECTIONS;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::moves::ray_moves::cast_rays;

pub fn gather_rook_moves(
    game: &ChessGame,
    source: Location,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    cast_rays(game.board(), source, color, &ORTHOGONAL_DIRECTIONS, 7, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, PieceKind};

    #[test]
    fn rook_sees_fourteen_squares_on_an_open_board() {
        let mut game = ChessGame::new_empty();
        let e4 = Location::new(4, 3);
        game.set_square_occupant(e4, Some(Piece::new(PieceKind::Rook, Color::White)));
        let mut out = Vec::new();
        gather_rook_moves(&game, e4, Color::White, &mut out);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn rook_is_boxed_in_at_the_start() {
        let game = ChessGame::new_game();
        let mut out = Vec::new();
        gather_rook_moves(&game, Location::new(0, 0), Color::White, &mut out);
        assert!(out.is_empty());
    }
}
