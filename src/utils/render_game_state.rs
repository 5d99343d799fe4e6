//! Terminal board renderer for the CLI, logs and test failure output.

use crate::game_state::board_location::Location;
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::game_state::ChessGame;

/// Renders the board with rank 8 at the top and file labels above and below.
/// Empty squares print as `·`.
pub fn render_game_state(game: &ChessGame) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8i8).rev() {
        let label = char::from(b'1' + rank as u8);
        out.push(label);
        out.push(' ');

        for file in 0..8i8 {
            let square = match game.get_square_occupant(Location::new(file, rank)) {
                Some(piece) => piece_to_unicode(piece),
                None => '·',
            };
            out.push(square);
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
