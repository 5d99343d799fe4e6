//! Attack and check queries.
//!
//! Attacks are traced outward from the target square, so a check test costs a
//! handful of ray walks instead of a full opposing move generation. The
//! result matches the king-capture definition: a color is in check exactly
//! when some opposing pseudo-legal move captures its king.

use crate::game_state::board_location::Location;
use crate::game_state::chess_rules::{
    ALL_DIRECTIONS, DIAGONAL_DIRECTIONS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS,
};
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::game_state::Board;

#[inline]
fn holds(board: &Board, location: Location, kind: PieceKind, color: Color) -> bool {
    board.occupant(location) == Some(Piece::new(kind, color))
}

/// First occupied square along `direction` from `origin`, exclusive.
fn first_blocker(board: &Board, origin: Location, direction: Location) -> Option<Piece> {
    let mut probe = origin + direction;
    while probe.is_valid() {
        if let Some(piece) = board.occupant(probe) {
            return Some(piece);
        }
        probe = probe + direction;
    }
    None
}

/// True if any piece of `attacker` could capture on `location`.
pub fn is_square_attacked(board: &Board, location: Location, attacker: Color) -> bool {
    let pawn_rank = -attacker.forward();
    let attacking_pawn = Piece::new(PieceKind::Pawn, attacker);
    let pawn_attacks_from = |side: i8| {
        board.occupant(location + Location::new(side, pawn_rank)) == Some(attacking_pawn)
    };
    if pawn_attacks_from(-1) || pawn_attacks_from(1) {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&offset| holds(board, location + offset, PieceKind::Knight, attacker))
    {
        return true;
    }

    if ALL_DIRECTIONS
        .iter()
        .any(|&direction| holds(board, location + direction, PieceKind::King, attacker))
    {
        return true;
    }

    let slides = |directions: &[Location], kind: PieceKind| {
        directions.iter().any(|&direction| {
            first_blocker(board, location, direction).is_some_and(|piece| {
                piece.color == attacker && (piece.kind == kind || piece.kind == PieceKind::Queen)
            })
        })
    };
    slides(&ORTHOGONAL_DIRECTIONS, PieceKind::Rook)
        || slides(&DIAGONAL_DIRECTIONS, PieceKind::Bishop)
}

/// A color without a king on the board is never in check.
pub fn is_color_in_check(board: &Board, color: Color) -> bool {
    board
        .king_location(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::ChessGame;
    use crate::utils::fen_parser::parse_placement;

    fn attacked_by_capture(game: &ChessGame, location: Location, attacker: Color) -> bool {
        game.gather_all_moves_for_color(attacker)
            .iter()
            .any(|mv| mv.is_capture() && mv.destination == location)
    }

    #[test]
    fn pawn_attacks_depend_on_color() {
        let game = parse_placement("8/8/8/3p4/8/3P4/8/8").expect("placement");
        let board = game.board();
        assert!(is_square_attacked(board, Location::new(2, 3), Color::White));
        assert!(is_square_attacked(board, Location::new(4, 3), Color::Black));
        assert!(!is_square_attacked(board, Location::new(3, 3), Color::White));
        assert!(!is_square_attacked(board, Location::new(2, 1), Color::Black));
    }

    #[test]
    fn sliders_are_blocked_by_any_piece() {
        let game = parse_placement("q7/8/8/3P4/8/8/8/7K").expect("placement");
        assert!(!is_square_attacked(game.board(), Location::new(7, 0), Color::Black));
        assert!(!is_color_in_check(game.board(), Color::White));

        let open = parse_placement("q7/8/8/8/8/8/8/7K").expect("placement");
        assert!(is_color_in_check(open.board(), Color::White));
    }

    #[test]
    fn attack_map_agrees_with_generated_captures_on_every_king_square() {
        // Place a lone enemy king on each empty square of a busy position and
        // compare both definitions of "can be captured there".
        let base = parse_placement("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R")
            .expect("placement");
        for location in Location::all() {
            if base.get_square_occupant(location).is_some() {
                continue;
            }
            for attacker in [Color::White, Color::Black] {
                let mut probe = base.clone();
                probe.set_square_occupant(
                    location,
                    Some(Piece::new(PieceKind::Pawn, attacker.opposite())),
                );
                assert_eq!(
                    is_square_attacked(probe.board(), location, attacker),
                    attacked_by_capture(&probe, location, attacker),
                    "disagreement at {location} for {}",
                    attacker.name()
                );
            }
        }
    }
}
