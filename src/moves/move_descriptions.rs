//! Human-readable move summaries for move-history lists and promotion
//! choice dialogs.

use std::fmt;

use crate::moves::chess_move::{ChessMove, MoveKind};

impl ChessMove {
    /// One-line summary such as `"Move A2 to A4"` or `"A2 captures B3"`.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (src, dst) = (self.source, self.destination);
        match &self.kind {
            MoveKind::Travel => write!(f, "Move {src} to {dst}"),
            MoveKind::Capture { .. } => write!(f, "{src} captures {dst}"),
            MoveKind::Castle { .. } => write!(f, "Castle {src} to {dst}"),
            MoveKind::Promotion { promote_to, .. } => {
                write!(f, "Promote pawn to {} at {dst}", promote_to.name())
            }
            MoveKind::CapturePromotion { promote_to, .. } => write!(
                f,
                "{src} captures {dst} and promotes to {}",
                promote_to.name()
            ),
            MoveKind::EnPassant {
                capture_location, ..
            } => write!(f, "{src} captures {capture_location} en passant"),
        }
    }
}
