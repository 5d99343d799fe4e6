//! Canonical chess-rule constants.
//!
//! Starting layout, piece direction sets and scoring constants shared by move
//! generation and search.

use crate::game_state::board_location::Location;
use crate::game_state::chess_types::PieceKind;

/// Standard starting placement in FEN piece-placement form.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Back-row kinds from file A to file H.
pub const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_HOME_FILE: i8 = 4;
pub const KINGSIDE_ROOK_FILE: i8 = 7;
pub const QUEENSIDE_ROOK_FILE: i8 = 0;

pub const KNIGHT_OFFSETS: [Location; 8] = [
    Location::new(1, 2),
    Location::new(2, 1),
    Location::new(2, -1),
    Location::new(1, -2),
    Location::new(-1, -2),
    Location::new(-2, -1),
    Location::new(-2, 1),
    Location::new(-1, 2),
];

pub const ORTHOGONAL_DIRECTIONS: [Location; 4] = [
    Location::new(1, 0),
    Location::new(-1, 0),
    Location::new(0, 1),
    Location::new(0, -1),
];

pub const DIAGONAL_DIRECTIONS: [Location; 4] = [
    Location::new(1, 1),
    Location::new(1, -1),
    Location::new(-1, 1),
    Location::new(-1, -1),
];

pub const ALL_DIRECTIONS: [Location; 8] = [
    Location::new(1, 0),
    Location::new(-1, 0),
    Location::new(0, 1),
    Location::new(0, -1),
    Location::new(1, 1),
    Location::new(1, -1),
    Location::new(-1, 1),
    Location::new(-1, -1),
];

/// Terminal score magnitude for checkmate.
pub const CHECKMATE_SCORE: i32 = 10_000;
/// Terminal score for stalemate, whichever side is to move.
pub const STALEMATE_SCORE: i32 = -10_000;
