//! Long-algebraic ("e2e4", "e7e8q") text for moves.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_location::Location;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;

pub fn to_long_algebraic(mv: &ChessMove) -> String {
    let mut out = format!("{}{}", mv.source, mv.destination).to_ascii_lowercase();
    if let Some(kind) = mv.promotion_kind() {
        out.push(kind.letter());
    }
    out
}

/// Finds the legal move of `color` that `text` names. A bare promotion
/// ("b7b8") selects the queen.
pub fn find_legal_move(game: &mut ChessGame, color: Color, text: &str) -> ChessResult<ChessMove> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::IllegalMove(format!("malformed move text '{text}'")));
    }
    let source = Location::from_algebraic(&text[0..2]);
    let destination = Location::from_algebraic(&text[2..4]);
    let (Some(source), Some(destination)) = (source, destination) else {
        return Err(ChessError::IllegalMove(format!("malformed squares in '{text}'")));
    };
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(promotion_from_char(ch).ok_or_else(|| {
            ChessError::IllegalMove(format!("unknown promotion piece '{ch}'"))
        })?),
    };

    let (_, legal) = game.generate_all_legal_moves_for_color(color);
    legal
        .into_iter()
        .filter(|mv| mv.source == source && mv.destination == destination)
        .find(|mv| match mv.promotion_kind() {
            None => promotion.is_none(),
            Some(kind) => kind == promotion.unwrap_or(PieceKind::Queen),
        })
        .ok_or_else(|| {
            ChessError::IllegalMove(format!("'{text}' is not legal for {}", color.name()))
        })
}

fn promotion_from_char(ch: char) -> Option<PieceKind> {
    PieceKind::PROMOTIONS
        .into_iter()
        .find(|kind| kind.letter() == ch.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_placement;

    #[test]
    fn round_trips_through_text() {
        let mut game = ChessGame::new_game();
        let mv = find_legal_move(&mut game, Color::White, "g1f3").expect("legal");
        assert_eq!(to_long_algebraic(&mv), "g1f3");
        assert!(!mv.is_capture());
    }

    #[test]
    fn promotion_suffix_picks_the_piece() {
        let mut game = parse_placement("8/P7/8/8/8/8/8/k1K5").expect("placement");
        let knight = find_legal_move(&mut game, Color::White, "a7a8n").expect("legal");
        assert_eq!(knight.promotion_kind(), Some(PieceKind::Knight));
        assert_eq!(to_long_algebraic(&knight), "a7a8n");
        let default = find_legal_move(&mut game, Color::White, "a7a8").expect("legal");
        assert_eq!(default.promotion_kind(), Some(PieceKind::Queen));
        assert!(find_legal_move(&mut game, Color::White, "a7a8k").is_err());
    }

    #[test]
    fn rejects_garbage_and_illegal_moves() {
        let mut game = ChessGame::new_game();
        assert!(find_legal_move(&mut game, Color::White, "e2").is_err());
        assert!(find_legal_move(&mut game, Color::White, "z9e4").is_err());
        assert!(find_legal_move(&mut game, Color::White, "e2e5").is_err());
        assert!(find_legal_move(&mut game, Color::Black, "e2e4").is_err());
    }
}
