//! Pawn pushes, captures, promotions and en passant.

use crate::game_state::board_location::Location;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::{ChessMove, MoveKind};

pub fn gather_pawn_moves(
    game: &ChessGame,
    source: Location,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    let board = game.board();
    let forward = Location::new(0, color.forward());
    let promotion_rank = color.opposite().home_rank();
    let start_rank = color.home_rank() + color.forward();

    let one_step = source + forward;
    if board.is_vacant(one_step) {
        if one_step.rank == promotion_rank {
            for kind in PieceKind::PROMOTIONS {
                out.push(ChessMove::promotion(source, one_step, kind));
            }
        } else {
            out.push(ChessMove::travel(source, one_step));
            let two_step = one_step + forward;
            if source.rank == start_rank && board.is_vacant(two_step) {
                out.push(ChessMove::travel(source, two_step));
            }
        }
    }

    for side in [-1, 1] {
        let target = source + forward + Location::new(side, 0);
        if !target.is_valid() {
            continue;
        }
        match board.occupant(target) {
            Some(victim) if victim.color != color => {
                if target.rank == promotion_rank {
                    for kind in PieceKind::PROMOTIONS {
                        out.push(ChessMove::capture_promotion(source, target, kind));
                    }
                } else {
                    out.push(ChessMove::capture(source, target));
                }
            }
            Some(_) => {}
            None => {
                let beside = source + Location::new(side, 0);
                if just_double_stepped(game, beside, color.opposite()) {
                    out.push(ChessMove::en_passant(source, target, beside));
                }
            }
        }
    }
}

/// True if the previous move was a two-square advance of a `color` pawn
/// that landed on `location`.
fn just_double_stepped(game: &ChessGame, location: Location, color: Color) -> bool {
    let Some(last) = game.last_move() else {
        return false;
    };
    if last.kind != MoveKind::Travel || last.destination != location {
        return false;
    }
    let is_enemy_pawn = game
        .get_square_occupant(location)
        .is_some_and(|piece| piece.kind == PieceKind::Pawn && piece.color == color);
    is_enemy_pawn
        && last.source.file == location.file
        && (last.destination.rank - last.source.rank).abs() == 2
}
