//! King steps and castling.

use crate::game_state::board_location::Location;
use crate::game_state::chess_rules::{
    ALL_DIRECTIONS, KINGSIDE_ROOK_FILE, KING_HOME_FILE, QUEENSIDE_ROOK_FILE,
};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::ChessGame;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::chess_move::ChessMove;
use crate::moves::ray_moves::cast_rays;

pub fn gather_king_moves(
    game: &ChessGame,
    source: Location,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    cast_rays(game.board(), source, color, &ALL_DIRECTIONS, 1, out);
    gather_castles(game, source, color, out);
}

/// Castling needs an untouched king and rook, empty squares between them, and
/// a king that is not in check and does not cross or land on an attacked square.
fn gather_castles(game: &ChessGame, source: Location, color: Color, out: &mut Vec<ChessMove>) {
    let home = Location::new(KING_HOME_FILE, color.home_rank());
    if source != home || !game.is_square_untouched(home) {
        return;
    }
    let board = game.board();
    let enemy = color.opposite();
    if is_square_attacked(board, home, enemy) {
        return;
    }

    for rook_file in [KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE] {
        let rook_source = Location::new(rook_file, home.rank);
        let is_own_rook = board
            .occupant(rook_source)
            .is_some_and(|piece| piece.kind == PieceKind::Rook && piece.color == color);
        if !is_own_rook || !game.is_square_untouched(rook_source) {
            continue;
        }

        let step = Location::new((rook_file - KING_HOME_FILE).signum(), 0);
        let mut between = home + step;
        let mut clear = true;
        while between != rook_source {
            if !board.is_vacant(between) {
                clear = false;
                break;
            }
            between = between + step;
        }
        if !clear {
            continue;
        }

        let transit = home + step;
        let destination = home + step * 2;
        if is_square_attacked(board, transit, enemy)
            || is_square_attacked(board, destination, enemy)
        {
            continue;
        }
        out.push(ChessMove::castle(home, destination, rook_source, transit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::chess_move::MoveKind;
    use crate::utils::fen_parser::parse_placement;

    fn castles(game: &ChessGame, color: Color) -> Vec<ChessMove> {
        let source = Location::new(KING_HOME_FILE, color.home_rank());
        let mut out = Vec::new();
        gather_king_moves(game, source, color, &mut out);
        out.retain(|mv| matches!(mv.kind, MoveKind::Castle { .. }));
        out
    }

    #[test]
    fn both_sides_castle_on_an_open_back_rank() {
        let game = parse_placement("r3k2r/8/8/8/8/8/8/R3K2R").expect("placement");
        let white = castles(&game, Color::White);
        assert_eq!(white.len(), 2);
        assert!(white.iter().any(|mv| mv.destination == Location::new(6, 0)
            && mv.touches(Location::new(5, 0))));
        assert!(white.iter().any(|mv| mv.destination == Location::new(2, 0)
            && mv.touches(Location::new(3, 0))));
        assert_eq!(castles(&game, Color::Black).len(), 2);
    }

    #[test]
    fn pieces_between_block_castling() {
        let game = parse_placement("4k3/8/8/8/8/8/8/RN2K1NR").expect("placement");
        assert!(castles(&game, Color::White).is_empty());
    }

    #[test]
    fn lone_king_steps_to_eight_squares() {
        let game = parse_placement("8/8/8/8/3K4/8/8/8").expect("placement");
        let mut out = Vec::new();
        gather_king_moves(&game, Location::new(3, 3), Color::White, &mut out);
        assert_eq!(out.len(), 8);
    }
}
