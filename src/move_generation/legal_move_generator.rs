//! Full legal move generation pipeline.
//!
//! Gathers piece-wise pseudo-legal moves in board order, then filters out
//! moves that leave the mover's own king in check by pushing each candidate,
//! testing, and popping it again.

use crate::game_state::board_location::Location;
use crate::game_state::chess_types::{Color, GameResult, Piece, PieceKind};
use crate::game_state::game_state::ChessGame;
use crate::moves::bishop_moves::gather_bishop_moves;
use crate::moves::chess_move::ChessMove;
use crate::moves::king_moves::gather_king_moves;
use crate::moves::knight_moves::gather_knight_moves;
use crate::moves::pawn_moves::gather_pawn_moves;
use crate::moves::queen_moves::gather_queen_moves;
use crate::moves::rook_moves::gather_rook_moves;

/// Pseudo-legal moves of the piece standing on `source`.
pub fn gather_moves_for_piece(
    game: &ChessGame,
    source: Location,
    piece: Piece,
    out: &mut Vec<ChessMove>,
) {
    let gather = match piece.kind {
        PieceKind::Pawn => gather_pawn_moves,
        PieceKind::Knight => gather_knight_moves,
        PieceKind::Bishop => gather_bishop_moves,
        PieceKind::Rook => gather_rook_moves,
        PieceKind::Queen => gather_queen_moves,
        PieceKind::King => gather_king_moves,
    };
    gather(game, source, piece.color, out);
}

/// Appends every pseudo-legal move of `color` to `out`, in file-major order
/// of the moving piece.
pub fn gather_all_moves_for_color(game: &ChessGame, color: Color, out: &mut Vec<ChessMove>) {
    for (source, piece) in game.board().occupied() {
        if piece.color == color {
            gather_moves_for_piece(game, source, piece, out);
        }
    }
}

/// Legal moves for `color` plus the classification of the position for it.
/// The game is restored to its prior state before returning.
pub fn generate_all_legal_moves_for_color(
    game: &mut ChessGame,
    color: Color,
) -> (GameResult, Vec<ChessMove>) {
    let mut pseudo = Vec::with_capacity(64);
    gather_all_moves_for_color(game, color, &mut pseudo);

    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        game.push_move(mv);
        let exposes_king = game.is_color_in_check(color);
        let mv = game.pop_move();
        if !exposes_king {
            legal.push(mv);
        }
    }

    let in_check = game.is_color_in_check(color);
    let result = match (legal.is_empty(), in_check) {
        (true, true) => GameResult::CheckMate,
        (true, false) => GameResult::StaleMate,
        (false, true) => GameResult::Check,
        (false, false) => GameResult::None,
    };
    (result, legal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_placement;

    #[test]
    fn generation_leaves_history_and_board_untouched() {
        let mut game = parse_placement("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R")
            .expect("placement");
        let before = game.clone();
        let (result, moves) = generate_all_legal_moves_for_color(&mut game, Color::White);
        assert_eq!(result, GameResult::None);
        assert_eq!(moves.len(), 48);
        assert_eq!(game, before);
    }

    #[test]
    fn pinned_piece_may_not_leave_the_pin_line() {
        // The e2 knight shields the white king from the e8 rook.
        let mut game = parse_placement("4r1k1/8/8/8/8/8/4N3/4K3").expect("placement");
        let (_, moves) = generate_all_legal_moves_for_color(&mut game, Color::White);
        assert!(moves.iter().all(|mv| mv.source != Location::new(4, 1)));
        assert!(!moves.is_empty());
    }

    #[test]
    fn pseudo_legal_order_is_file_major() {
        let game = ChessGame::new_game();
        let mut out = Vec::new();
        gather_all_moves_for_color(&game, Color::White, &mut out);
        assert_eq!(out.len(), 20);
        // File A pieces come first.
        let first_file = out.first().map(|mv| mv.source.file);
        assert_eq!(first_file, Some(0));
        assert!(out.windows(2).all(|pair| pair[0].source.file <= pair[1].source.file));
    }
}
