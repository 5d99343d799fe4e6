//! Errors used throughout the chess engine.
//!
//! Two error families live here. `MoveError` explains why a single move could
//! not be applied to (or reverted from) a board; it only ever surfaces when an
//! engine invariant has been broken or a move was decoded from untrusted data.
//! `ChessError` is the crate-wide recoverable error returned by persistence,
//! configuration, setup parsing and session operations.
//!
//! Usage guidelines:
//! - Operations on engine-generated moves (`ChessGame::push_move`/`pop_move`)
//!   treat a `MoveError` as a fatal invariant violation and panic.
//! - Operations fed by users or files (`GameSession::make_move`, redo, loading a
//!   saved game) return `ChessResult` so the host can recover, usually by
//!   resetting to a fresh game.

use thiserror::Error;

use crate::game_state::board_location::Location;
use crate::game_state::chess_types::PieceKind;

/// Reason a move could not be applied to or reverted from a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// A location referenced by the move lies outside the 8x8 board.
    #[error("location {0:?} is off the board")]
    OffBoard(Location),

    /// The square the move starts from holds no piece.
    #[error("no piece at source square {0}")]
    EmptySource(Location),

    /// The square the move lands on must be empty but is occupied.
    #[error("destination square {0} is occupied")]
    OccupiedDestination(Location),

    /// A piece was found where one was expected but it has the wrong identity.
    #[error("expected a {expected:?} at {location}")]
    WrongPiece {
        location: Location,
        expected: PieceKind,
    },

    /// The square to capture from holds no enemy piece.
    #[error("no enemy piece to capture at {0}")]
    NothingToCapture(Location),

    /// Revert was requested but the move holds no off-board piece to restore.
    #[error("move holds no off-board piece to restore")]
    NothingToRestore,

    /// Apply was requested on a move that already holds an off-board piece.
    #[error("move already holds an off-board piece")]
    AlreadyApplied,
}

/// Unified recoverable error type for the chess engine.
#[derive(Debug, Error)]
pub enum ChessError {
    /// Reading or writing a stream failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// A persistence tag byte that maps to no known object.
    #[error("unknown object tag {0}")]
    UnknownTag(u8),

    /// A persistence tag byte that is valid but not allowed at this position.
    #[error("expected {expected} tag, found {found}")]
    UnexpectedTag { expected: &'static str, found: u8 },

    /// A color byte outside the two encoded colors.
    #[error("invalid color byte {0}")]
    InvalidColor(u8),

    /// A stored location outside the board.
    #[error("stored location ({0}, {1}) is off the board")]
    InvalidLocation(i32, i32),

    /// A stored move count that cannot be right.
    #[error("invalid move count {0}")]
    InvalidMoveCount(i32),

    /// A loaded move history that cannot be unwound on the loaded board.
    #[error("move history is inconsistent with the board: {0}")]
    CorruptHistory(String),

    /// A user-supplied move that is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A move failed to apply or revert.
    #[error("move application failed: {0}")]
    MoveApplication(#[from] MoveError),

    /// A board placement string could not be parsed.
    #[error("invalid placement string: {0}")]
    InvalidPlacement(String),

    /// Engine configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Engine configuration file failed to parse.
    #[error("configuration parse failure: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type ChessResult<T> = Result<T, ChessError>;
