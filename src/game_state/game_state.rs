//! Core board + history representation.
//!
//! `ChessGame` is the central model for the engine. It owns an 8x8 occupancy
//! grid and the move stack. The move stack is the authoritative history: it
//! answers "has this square's piece ever moved" for castling and "what was the
//! last move" for en passant, and pushing/popping it is how both gameplay and
//! search look-ahead advance and rewind the position.

use tracing::trace;

use crate::chess_errors::{ChessError, ChessResult, MoveError};
use crate::game_state::board_location::{Location, BOARD_FILES, BOARD_RANKS};
use crate::game_state::chess_rules::BACK_ROW;
use crate::game_state::chess_types::{Color, GameResult, Piece, PieceKind};
use crate::move_generation::legal_move_checks::{is_color_in_check, is_square_attacked};
use crate::move_generation::legal_move_generator::{
    gather_all_moves_for_color, generate_all_legal_moves_for_color,
};
use crate::moves::chess_move::ChessMove;

/// 8x8 occupancy grid indexed `[file][rank]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_RANKS as usize]; BOARD_FILES as usize],
}

impl Board {
    #[inline]
    pub fn occupant(&self, location: Location) -> Option<Piece> {
        if !location.is_valid() {
            return None;
        }
        self.squares[location.file as usize][location.rank as usize]
    }

    /// Replaces the occupant of `location`, returning the previous one.
    /// Off-board locations are ignored.
    #[inline]
    pub fn set_occupant(&mut self, location: Location, piece: Option<Piece>) -> Option<Piece> {
        if !location.is_valid() {
            return None;
        }
        std::mem::replace(
            &mut self.squares[location.file as usize][location.rank as usize],
            piece,
        )
    }

    #[inline]
    pub fn take(&mut self, location: Location) -> Option<Piece> {
        self.set_occupant(location, None)
    }

    /// True only for on-board squares with no occupant.
    #[inline]
    pub fn is_vacant(&self, location: Location) -> bool {
        location.is_valid() && self.occupant(location).is_none()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Location, Piece)> + '_ {
        Location::all().filter_map(move |loc| self.occupant(loc).map(|piece| (loc, piece)))
    }

    pub fn king_location(&self, color: Color) -> Option<Location> {
        self.occupied()
            .find(|(_, piece)| piece.is_king_of(color))
            .map(|(loc, _)| loc)
    }

    pub fn num_pieces(&self) -> usize {
        self.occupied().count()
    }

    pub fn clear(&mut self) {
        *self = Board::default();
    }
}

/// Board plus move stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChessGame {
    board: Board,
    move_stack: Vec<ChessMove>,
}

impl ChessGame {
    /// An empty board with no history.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// The standard starting position.
    pub fn new_game() -> Self {
        let mut game = Self::default();
        game.reset();
        game
    }

    /// Reassembles a game from a board and its already-applied history.
    /// Callers must check that the history actually unwinds on `board`.
    pub(crate) fn from_parts(board: Board, move_stack: Vec<ChessMove>) -> Self {
        Self { board, move_stack }
    }

    /// Clears board and history, then sets up the standard starting position.
    pub fn reset(&mut self) {
        self.clear();
        for (file, kind) in BACK_ROW.iter().enumerate() {
            let file = file as i8;
            for color in [Color::White, Color::Black] {
                let home = color.home_rank();
                self.board
                    .set_occupant(Location::new(file, home), Some(Piece::new(*kind, color)));
                self.board.set_occupant(
                    Location::new(file, home + color.forward()),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
    }

    /// Drops every piece and every move, including pieces held by captures.
    pub fn clear(&mut self) {
        self.board.clear();
        self.move_stack.clear();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn is_location_valid(&self, location: Location) -> bool {
        location.is_valid()
    }

    #[inline]
    pub fn get_square_occupant(&self, location: Location) -> Option<Piece> {
        self.board.occupant(location)
    }

    /// Direct placement for position setup; bypasses the move stack.
    pub fn set_square_occupant(&mut self, location: Location, piece: Option<Piece>) {
        self.board.set_occupant(location, piece);
    }

    /// Applies `mv` and records it.
    ///
    /// # Panics
    /// If the move does not apply to the current occupancy. Only moves the
    /// engine generated for this position may be pushed.
    pub fn push_move(&mut self, mv: ChessMove) {
        if let Err(err) = self.try_push_move(mv) {
            panic!("pushed a move that cannot apply: {err}");
        }
    }

    /// Reverts and removes the most recent move.
    ///
    /// # Panics
    /// On an empty stack or if the move fails to revert.
    pub fn pop_move(&mut self) -> ChessMove {
        match self.try_pop_move() {
            Ok(mv) => mv,
            Err(err) => panic!("failed to pop move: {err}"),
        }
    }

    /// Fallible `push_move` for moves that did not come from this game's
    /// generator (redo history, decoded files).
    pub fn try_push_move(&mut self, mut mv: ChessMove) -> Result<(), MoveError> {
        mv.apply(&mut self.board)?;
        trace!(depth = self.move_stack.len(), "push {}", mv);
        self.move_stack.push(mv);
        Ok(())
    }

    pub fn try_pop_move(&mut self) -> ChessResult<ChessMove> {
        let Some(mut mv) = self.move_stack.pop() else {
            return Err(ChessError::CorruptHistory("move stack underflow".to_owned()));
        };
        if let Err(err) = mv.revert(&mut self.board) {
            self.move_stack.push(mv);
            return Err(err.into());
        }
        Ok(mv)
    }

    #[inline]
    pub fn get_num_moves(&self) -> usize {
        self.move_stack.len()
    }

    #[inline]
    pub fn get_move(&self, index: usize) -> Option<&ChessMove> {
        self.move_stack.get(index)
    }

    #[inline]
    pub fn last_move(&self) -> Option<&ChessMove> {
        self.move_stack.last()
    }

    #[inline]
    pub fn moves(&self) -> &[ChessMove] {
        &self.move_stack
    }

    /// True if any recorded move started from `location`.
    pub fn piece_ever_moved_from_location(&self, location: Location) -> bool {
        self.move_stack.iter().any(|mv| mv.source == location)
    }

    /// True if no recorded move has moved a piece off of or onto `location`.
    pub fn is_square_untouched(&self, location: Location) -> bool {
        !self.move_stack.iter().any(|mv| mv.touches(location))
    }

    #[inline]
    pub fn get_num_pieces_on_board(&self) -> usize {
        self.board.num_pieces()
    }

    /// Pseudo-legal moves for every piece of `color`, in board order.
    pub fn gather_all_moves_for_color(&self, color: Color) -> Vec<ChessMove> {
        let mut moves = Vec::with_capacity(64);
        gather_all_moves_for_color(self, color, &mut moves);
        moves
    }

    /// Legal moves for `color`, assuming it is that color's turn.
    pub fn generate_all_legal_moves_for_color(
        &mut self,
        color: Color,
    ) -> (GameResult, Vec<ChessMove>) {
        generate_all_legal_moves_for_color(self, color)
    }

    #[inline]
    pub fn is_color_in_check(&self, color: Color) -> bool {
        is_color_in_check(&self.board, color)
    }

    #[inline]
    pub fn is_square_attacked_by(&self, location: Location, color: Color) -> bool {
        is_square_attacked(&self.board, location, color)
    }

    /// Pieces of `color` currently held off-board by moves in the history,
    /// oldest capture first.
    pub fn captured_pieces(&self, color: Color) -> Vec<Piece> {
        self.move_stack
            .iter()
            .filter_map(ChessMove::captured_piece)
            .filter(|piece| piece.color == color)
            .collect()
    }

    /// Locations of pieces (either color) with a pseudo-legal move targeting
    /// `location`.
    pub fn pieces_seeing(&self, location: Location) -> Vec<Location> {
        let mut seers = Vec::new();
        for color in [Color::White, Color::Black] {
            for mv in self.gather_all_moves_for_color(color) {
                let targets = mv.destination == location
                    || mv.en_passant_capture_location() == Some(location);
                if targets && !seers.contains(&mv.source) {
                    seers.push(mv.source);
                }
            }
        }
        seers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_placement;
    use crate::utils::long_algebraic::find_legal_move;

    fn play(game: &mut ChessGame, color: Color, text: &str) {
        let mv = find_legal_move(game, color, text).expect("move should be legal");
        game.push_move(mv);
    }

    #[test]
    fn reset_builds_the_starting_position() {
        let game = ChessGame::new_game();
        assert_eq!(game.get_num_pieces_on_board(), 32);
        assert_eq!(
            game.get_square_occupant(Location::new(4, 0)),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            game.get_square_occupant(Location::new(3, 7)),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            game.get_square_occupant(Location::new(5, 6)),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(game.get_square_occupant(Location::new(4, 4)), None);
        assert_eq!(game.get_num_moves(), 0);
    }

    #[test]
    fn white_has_twenty_legal_moves_at_the_start() {
        let mut game = ChessGame::new_game();
        let (result, moves) = game.generate_all_legal_moves_for_color(Color::White);
        assert_eq!(result, GameResult::None);
        assert_eq!(moves.len(), 20);
        assert_eq!(game, ChessGame::new_game());
    }

    #[test]
    fn queen_reaches_h5_only_after_the_king_pawn_moves() {
        let mut game = ChessGame::new_game();
        play(&mut game, Color::White, "e2e4");
        play(&mut game, Color::Black, "e7e5");

        let (_, moves) = game.generate_all_legal_moves_for_color(Color::White);
        let from = Location::new(3, 0);
        let h5 = Location::new(7, 4);
        assert!(moves
            .iter()
            .any(|mv| mv.source == from && mv.destination == h5));

        // Without 1.e4 the d1 queen is boxed in and h5 is unreachable.
        let mut fresh = ChessGame::new_game();
        let (_, moves) = fresh.generate_all_legal_moves_for_color(Color::White);
        assert!(!moves.iter().any(|mv| mv.source == from));
        assert!(find_legal_move(&mut fresh, Color::White, "d1h5").is_err());
    }

    #[test]
    fn fools_mate_is_detected_within_four_plies() {
        let mut game = ChessGame::new_game();
        play(&mut game, Color::White, "f2f3");
        play(&mut game, Color::Black, "e7e5");
        play(&mut game, Color::White, "g2g4");
        let (result, _) = game.generate_all_legal_moves_for_color(Color::White);
        assert_eq!(result, GameResult::None);
        play(&mut game, Color::Black, "d8h4");

        let (result, moves) = game.generate_all_legal_moves_for_color(Color::White);
        assert_eq!(result, GameResult::CheckMate);
        assert!(moves.is_empty());
        assert!(game.is_color_in_check(Color::White));
    }

    #[test]
    fn back_rank_mate_and_stalemate_are_classified() {
        let mut mate = parse_placement("3R2k1/5ppp/8/8/8/8/8/6K1").expect("placement");
        let (result, _) = mate.generate_all_legal_moves_for_color(Color::Black);
        assert_eq!(result, GameResult::CheckMate);

        let mut stale = parse_placement("7k/5Q2/6K1/8/8/8/8/8").expect("placement");
        let (result, moves) = stale.generate_all_legal_moves_for_color(Color::Black);
        assert_eq!(result, GameResult::StaleMate);
        assert!(moves.is_empty());
        assert!(!stale.is_color_in_check(Color::Black));

        let mut check = parse_placement("4k3/8/8/8/8/8/8/4RK2").expect("placement");
        let (result, moves) = check.generate_all_legal_moves_for_color(Color::Black);
        assert_eq!(result, GameResult::Check);
        assert!(!moves.is_empty());
    }

    #[test]
    fn legal_moves_never_leave_the_mover_in_check() {
        let mut game = parse_placement("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R")
            .expect("placement");
        for color in [Color::White, Color::Black] {
            let (_, moves) = game.generate_all_legal_moves_for_color(color);
            for mv in moves {
                game.push_move(mv);
                assert!(!game.is_color_in_check(color));
                game.pop_move();
            }
        }
    }

    #[test]
    fn check_matches_king_capture_definition() {
        let game = parse_placement("4k3/8/8/1B6/8/8/8/4K3").expect("placement");
        let king_capturable = game
            .gather_all_moves_for_color(Color::White)
            .iter()
            .any(|mv| {
                mv.is_capture()
                    && game.board().occupant(mv.destination).map(|p| p.kind)
                        == Some(PieceKind::King)
            });
        assert!(king_capturable);
        assert!(game.is_color_in_check(Color::Black));
        assert!(!game.is_color_in_check(Color::White));
    }

    #[test]
    fn push_pop_restores_exact_occupancy_for_every_move_variant() {
        // Castles, promotions, capture-promotions and captures are all available here.
        let mut game = parse_placement("r3k2r/1P6/8/8/8/8/6p1/R3K2R").expect("placement");
        for color in [Color::White, Color::Black] {
            for mv in game.gather_all_moves_for_color(color) {
                let before = game.clone();
                game.push_move(mv);
                game.pop_move();
                assert_eq!(game, before);
            }
        }

        // En passant.
        let mut game = ChessGame::new_game();
        play(&mut game, Color::White, "e2e4");
        play(&mut game, Color::Black, "a7a6");
        play(&mut game, Color::White, "e4e5");
        play(&mut game, Color::Black, "d7d5");
        let before = game.clone();
        let ep = find_legal_move(&mut game, Color::White, "e5d6").expect("en passant");
        assert!(ep.en_passant_capture_location().is_some());
        game.push_move(ep);
        assert_eq!(game.get_square_occupant(Location::new(3, 4)), None);
        game.pop_move();
        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_is_only_offered_immediately() {
        let mut game = ChessGame::new_game();
        play(&mut game, Color::White, "e2e4");
        play(&mut game, Color::Black, "a7a6");
        play(&mut game, Color::White, "e4e5");
        play(&mut game, Color::Black, "d7d5");
        assert!(find_legal_move(&mut game, Color::White, "e5d6").is_ok());

        play(&mut game, Color::White, "h2h3");
        play(&mut game, Color::Black, "a6a5");
        assert!(find_legal_move(&mut game, Color::White, "e5d6").is_err());
    }

    #[test]
    fn castling_depends_on_history_not_position() {
        let mut game = parse_placement("4k3/8/8/8/8/8/8/R3K2R").expect("placement");
        assert!(find_legal_move(&mut game, Color::White, "e1g1").is_ok());
        assert!(find_legal_move(&mut game, Color::White, "e1c1").is_ok());

        play(&mut game, Color::White, "h1h2");
        play(&mut game, Color::Black, "e8d8");
        play(&mut game, Color::White, "h2h1");
        play(&mut game, Color::Black, "d8e8");
        assert!(find_legal_move(&mut game, Color::White, "e1g1").is_err());
        assert!(find_legal_move(&mut game, Color::White, "e1c1").is_ok());

        play(&mut game, Color::White, "e1f1");
        play(&mut game, Color::Black, "e8d8");
        play(&mut game, Color::White, "f1e1");
        play(&mut game, Color::Black, "d8e8");
        assert!(find_legal_move(&mut game, Color::White, "e1c1").is_err());
    }

    #[test]
    fn castling_through_an_attacked_square_is_refused() {
        // The black rook on f8 covers f1.
        let mut game = parse_placement("4kr2/8/8/8/8/8/8/R3K2R").expect("placement");
        assert!(find_legal_move(&mut game, Color::White, "e1g1").is_err());
        assert!(find_legal_move(&mut game, Color::White, "e1c1").is_ok());

        // No castling out of check.
        let mut game = parse_placement("4r1k1/8/8/8/8/8/8/R3K2R").expect("placement");
        assert!(find_legal_move(&mut game, Color::White, "e1g1").is_err());
        assert!(find_legal_move(&mut game, Color::White, "e1c1").is_err());
    }

    #[test]
    fn captured_pieces_and_visibility_queries() {
        let mut game = ChessGame::new_game();
        play(&mut game, Color::White, "e2e4");
        play(&mut game, Color::Black, "d7d5");
        play(&mut game, Color::White, "e4d5");
        assert_eq!(
            game.captured_pieces(Color::Black),
            vec![Piece::new(PieceKind::Pawn, Color::Black)]
        );
        assert!(game.captured_pieces(Color::White).is_empty());

        let seers = game.pieces_seeing(Location::new(3, 4));
        assert!(seers.contains(&Location::new(3, 7)));
        assert!(!seers.contains(&Location::new(3, 0)));

        assert!(game.piece_ever_moved_from_location(Location::new(4, 1)));
        assert!(!game.is_square_untouched(Location::new(3, 4)));
        assert!(game.is_square_untouched(Location::new(0, 0)));
    }

    #[test]
    fn try_pop_on_empty_stack_is_an_error() {
        let mut game = ChessGame::new_game();
        assert!(game.try_pop_move().is_err());
    }

    #[test]
    #[should_panic(expected = "pushed a move that cannot apply")]
    fn pushing_an_inapplicable_move_panics() {
        let mut game = ChessGame::new_game();
        game.push_move(ChessMove::travel(Location::new(4, 4), Location::new(4, 5)));
    }
}
