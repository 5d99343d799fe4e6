//! Reversible move commands.
//!
//! A `ChessMove` carries the shared source/destination pair plus a
//! `MoveKind` payload. Moves that remove a piece from the board keep it in an
//! owned slot of the payload while applied, so `revert` can put back exactly
//! what was there. Dropping an applied move drops the captured piece for good.
//!
//! Both `apply` and `revert` validate every precondition before touching the
//! board: on error the board is unchanged.

use crate::chess_errors::MoveError;
use crate::game_state::board_location::Location;
use crate::game_state::chess_types::{Piece, PieceKind};
use crate::game_state::game_state::Board;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Relocation onto an empty square.
    Travel,
    /// Relocation onto an enemy-occupied square.
    Capture { captured: Option<Piece> },
    /// King travels source -> destination while the rook travels alongside.
    Castle {
        rook_source: Location,
        rook_destination: Location,
    },
    /// Pawn replaced by `promote_to` on an empty far-rank square.
    Promotion {
        promote_to: PieceKind,
        pawn: Option<Piece>,
    },
    /// Pawn captures onto the far rank and is replaced by `promote_to`.
    CapturePromotion {
        promote_to: PieceKind,
        pawn: Option<Piece>,
        captured: Option<Piece>,
    },
    /// Pawn capture of a pawn beside it, landing behind that pawn.
    EnPassant {
        capture_location: Location,
        captured: Option<Piece>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub source: Location,
    pub destination: Location,
    pub kind: MoveKind,
}

impl ChessMove {
    #[inline]
    pub fn travel(source: Location, destination: Location) -> Self {
        Self {
            source,
            destination,
            kind: MoveKind::Travel,
        }
    }

    #[inline]
    pub fn capture(source: Location, destination: Location) -> Self {
        Self {
            source,
            destination,
            kind: MoveKind::Capture { captured: None },
        }
    }

    #[inline]
    pub fn castle(
        king_source: Location,
        king_destination: Location,
        rook_source: Location,
        rook_destination: Location,
    ) -> Self {
        Self {
            source: king_source,
            destination: king_destination,
            kind: MoveKind::Castle {
                rook_source,
                rook_destination,
            },
        }
    }

    #[inline]
    pub fn promotion(source: Location, destination: Location, promote_to: PieceKind) -> Self {
        Self {
            source,
            destination,
            kind: MoveKind::Promotion {
                promote_to,
                pawn: None,
            },
        }
    }

    #[inline]
    pub fn capture_promotion(
        source: Location,
        destination: Location,
        promote_to: PieceKind,
    ) -> Self {
        Self {
            source,
            destination,
            kind: MoveKind::CapturePromotion {
                promote_to,
                pawn: None,
                captured: None,
            },
        }
    }

    #[inline]
    pub fn en_passant(source: Location, destination: Location, capture_location: Location) -> Self {
        Self {
            source,
            destination,
            kind: MoveKind::EnPassant {
                capture_location,
                captured: None,
            },
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture { .. }
                | MoveKind::CapturePromotion { .. }
                | MoveKind::EnPassant { .. }
        )
    }

    #[inline]
    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { promote_to, .. }
            | MoveKind::CapturePromotion { promote_to, .. } => Some(promote_to),
            _ => None,
        }
    }

    #[inline]
    pub fn en_passant_capture_location(&self) -> Option<Location> {
        match self.kind {
            MoveKind::EnPassant {
                capture_location, ..
            } => Some(capture_location),
            _ => None,
        }
    }

    /// The piece this move currently holds off-board (only while applied).
    #[inline]
    pub fn captured_piece(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Capture { captured }
            | MoveKind::CapturePromotion { captured, .. }
            | MoveKind::EnPassant { captured, .. } => captured,
            _ => None,
        }
    }

    /// True if applying this move takes a piece off or puts a piece on `location`.
    pub fn touches(&self, location: Location) -> bool {
        if self.source == location || self.destination == location {
            return true;
        }
        match self.kind {
            MoveKind::Castle {
                rook_source,
                rook_destination,
            } => rook_source == location || rook_destination == location,
            MoveKind::EnPassant {
                capture_location, ..
            } => capture_location == location,
            _ => false,
        }
    }

    /// Same action as `other`, ignoring whatever pieces either one holds.
    pub fn same_action(&self, other: &ChessMove) -> bool {
        if self.source != other.source || self.destination != other.destination {
            return false;
        }
        match (&self.kind, &other.kind) {
            (MoveKind::Travel, MoveKind::Travel)
            | (MoveKind::Capture { .. }, MoveKind::Capture { .. }) => true,
            (
                MoveKind::Castle {
                    rook_source: a_src,
                    rook_destination: a_dst,
                },
                MoveKind::Castle {
                    rook_source: b_src,
                    rook_destination: b_dst,
                },
            ) => a_src == b_src && a_dst == b_dst,
            (
                MoveKind::Promotion { promote_to: a, .. },
                MoveKind::Promotion { promote_to: b, .. },
            )
            | (
                MoveKind::CapturePromotion { promote_to: a, .. },
                MoveKind::CapturePromotion { promote_to: b, .. },
            ) => a == b,
            (
                MoveKind::EnPassant {
                    capture_location: a,
                    ..
                },
                MoveKind::EnPassant {
                    capture_location: b,
                    ..
                },
            ) => a == b,
            _ => false,
        }
    }

    /// Ordering hint for search: larger keys are tried first. Must be read
    /// before the move is applied.
    pub fn sort_key(&self, board: &Board) -> i32 {
        let mover = board.occupant(self.source).map_or(0, Piece::score);
        let victim = board.occupant(self.destination).map_or(0, Piece::score);
        match &self.kind {
            MoveKind::Travel => 0,
            MoveKind::Capture { .. } => victim * 10 - mover,
            MoveKind::Castle { .. } => 5,
            MoveKind::Promotion { promote_to, .. } => promote_to.score(),
            MoveKind::CapturePromotion { promote_to, .. } => victim * 10 + promote_to.score(),
            MoveKind::EnPassant { .. } => PieceKind::Pawn.score() * 10 - mover,
        }
    }

    pub fn apply(&mut self, board: &mut Board) -> Result<(), MoveError> {
        let source = self.source;
        let destination = self.destination;
        check_on_board(source)?;
        check_on_board(destination)?;
        let mover = board.occupant(source).ok_or(MoveError::EmptySource(source))?;

        match &mut self.kind {
            MoveKind::Travel => {
                require_vacant(board, destination)?;
                board.take(source);
                board.set_occupant(destination, Some(mover));
            }
            MoveKind::Capture { captured } => {
                if captured.is_some() {
                    return Err(MoveError::AlreadyApplied);
                }
                require_enemy(board, destination, mover)?;
                *captured = board.take(destination);
                board.take(source);
                board.set_occupant(destination, Some(mover));
            }
            MoveKind::Castle {
                rook_source,
                rook_destination,
            } => {
                let (rook_source, rook_destination) = (*rook_source, *rook_destination);
                check_on_board(rook_source)?;
                check_on_board(rook_destination)?;
                require_kind(mover, source, PieceKind::King)?;
                let rook = board
                    .occupant(rook_source)
                    .filter(|rook| rook.kind == PieceKind::Rook && rook.color == mover.color)
                    .ok_or(MoveError::WrongPiece {
                        location: rook_source,
                        expected: PieceKind::Rook,
                    })?;
                require_vacant(board, destination)?;
                require_vacant(board, rook_destination)?;
                board.take(source);
                board.take(rook_source);
                board.set_occupant(destination, Some(mover));
                board.set_occupant(rook_destination, Some(rook));
            }
            MoveKind::Promotion { promote_to, pawn } => {
                if pawn.is_some() {
                    return Err(MoveError::AlreadyApplied);
                }
                require_kind(mover, source, PieceKind::Pawn)?;
                require_vacant(board, destination)?;
                *pawn = board.take(source);
                board.set_occupant(destination, Some(Piece::new(*promote_to, mover.color)));
            }
            MoveKind::CapturePromotion {
                promote_to,
                pawn,
                captured,
            } => {
                if pawn.is_some() || captured.is_some() {
                    return Err(MoveError::AlreadyApplied);
                }
                require_kind(mover, source, PieceKind::Pawn)?;
                require_enemy(board, destination, mover)?;
                *captured = board.take(destination);
                *pawn = board.take(source);
                board.set_occupant(destination, Some(Piece::new(*promote_to, mover.color)));
            }
            MoveKind::EnPassant {
                capture_location,
                captured,
            } => {
                let capture_location = *capture_location;
                if captured.is_some() {
                    return Err(MoveError::AlreadyApplied);
                }
                check_on_board(capture_location)?;
                require_kind(mover, source, PieceKind::Pawn)?;
                require_vacant(board, destination)?;
                require_enemy(board, capture_location, mover)?;
                *captured = board.take(capture_location);
                board.take(source);
                board.set_occupant(destination, Some(mover));
            }
        }
        Ok(())
    }

    pub fn revert(&mut self, board: &mut Board) -> Result<(), MoveError> {
        let source = self.source;
        let destination = self.destination;
        check_on_board(source)?;
        check_on_board(destination)?;
        let landed = board
            .occupant(destination)
            .ok_or(MoveError::EmptySource(destination))?;
        require_vacant(board, source)?;

        match &mut self.kind {
            MoveKind::Travel => {
                board.take(destination);
                board.set_occupant(source, Some(landed));
            }
            MoveKind::Capture { captured } => {
                let victim = captured.take().ok_or(MoveError::NothingToRestore)?;
                board.set_occupant(source, Some(landed));
                board.set_occupant(destination, Some(victim));
            }
            MoveKind::Castle {
                rook_source,
                rook_destination,
            } => {
                let (rook_source, rook_destination) = (*rook_source, *rook_destination);
                check_on_board(rook_source)?;
                check_on_board(rook_destination)?;
                require_kind(landed, destination, PieceKind::King)?;
                let rook = board
                    .occupant(rook_destination)
                    .filter(|rook| rook.kind == PieceKind::Rook && rook.color == landed.color)
                    .ok_or(MoveError::WrongPiece {
                        location: rook_destination,
                        expected: PieceKind::Rook,
                    })?;
                require_vacant(board, rook_source)?;
                board.take(destination);
                board.take(rook_destination);
                board.set_occupant(source, Some(landed));
                board.set_occupant(rook_source, Some(rook));
            }
            MoveKind::Promotion { promote_to, pawn } => {
                require_kind(landed, destination, *promote_to)?;
                let original = pawn.take().ok_or(MoveError::NothingToRestore)?;
                board.take(destination);
                board.set_occupant(source, Some(original));
            }
            MoveKind::CapturePromotion {
                promote_to,
                pawn,
                captured,
            } => {
                require_kind(landed, destination, *promote_to)?;
                if pawn.is_none() || captured.is_none() {
                    return Err(MoveError::NothingToRestore);
                }
                let (original, victim) = (pawn.take(), captured.take());
                board.set_occupant(source, original);
                board.set_occupant(destination, victim);
            }
            MoveKind::EnPassant {
                capture_location,
                captured,
            } => {
                let capture_location = *capture_location;
                check_on_board(capture_location)?;
                require_vacant(board, capture_location)?;
                let victim = captured.take().ok_or(MoveError::NothingToRestore)?;
                board.take(destination);
                board.set_occupant(source, Some(landed));
                board.set_occupant(capture_location, Some(victim));
            }
        }
        Ok(())
    }
}

#[inline]
fn check_on_board(location: Location) -> Result<(), MoveError> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(MoveError::OffBoard(location))
    }
}

#[inline]
fn require_vacant(board: &Board, location: Location) -> Result<(), MoveError> {
    if board.occupant(location).is_some() {
        return Err(MoveError::OccupiedDestination(location));
    }
    Ok(())
}

#[inline]
fn require_enemy(board: &Board, location: Location, mover: Piece) -> Result<(), MoveError> {
    match board.occupant(location) {
        Some(victim) if victim.color != mover.color => Ok(()),
        _ => Err(MoveError::NothingToCapture(location)),
    }
}

#[inline]
fn require_kind(piece: Piece, location: Location, expected: PieceKind) -> Result<(), MoveError> {
    if piece.kind == expected {
        Ok(())
    } else {
        Err(MoveError::WrongPiece { location, expected })
    }
}
