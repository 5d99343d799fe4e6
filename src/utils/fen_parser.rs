//! FEN piece-placement parsing and generation.
//!
//! Only the placement field is meaningful here: side to move, castling rights
//! and en passant availability all derive from the move history, which a
//! placement string cannot carry. Trailing FEN fields are accepted and ignored.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_location::{Location, BOARD_FILES, BOARD_RANKS};
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::game_state::ChessGame;

/// Builds a game with an empty history from a placement such as
/// `"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"`.
pub fn parse_placement(text: &str) -> ChessResult<ChessGame> {
    let board_part = text
        .split_whitespace()
        .next()
        .ok_or_else(|| ChessError::InvalidPlacement("empty placement".to_owned()))?;

    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != BOARD_RANKS as usize {
        return Err(ChessError::InvalidPlacement(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut game = ChessGame::new_empty();
    for (row, rank_text) in ranks.iter().enumerate() {
        let rank = BOARD_RANKS - 1 - row as i8;
        let mut file = 0i8;
        for ch in rank_text.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(ChessError::InvalidPlacement(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                let run = run as i8;
                if file + run > BOARD_FILES {
                    return Err(ChessError::InvalidPlacement(format!(
                        "rank {} has too many files",
                        rank + 1
                    )));
                }
                file += run;
                continue;
            }
            let piece = piece_from_fen_char(ch).ok_or_else(|| {
                ChessError::InvalidPlacement(format!("invalid piece character '{ch}'"))
            })?;
            if file >= BOARD_FILES {
                return Err(ChessError::InvalidPlacement(format!(
                    "rank {} has too many files",
                    rank + 1
                )));
            }
            game.set_square_occupant(Location::new(file, rank), Some(piece));
            file += 1;
        }
        if file != BOARD_FILES {
            return Err(ChessError::InvalidPlacement(format!(
                "rank {} does not sum to 8 files",
                rank + 1
            )));
        }
    }
    Ok(game)
}

/// Placement field of the current board.
pub fn placement_string(game: &ChessGame) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..BOARD_RANKS).rev() {
        let mut empty_run = 0;
        for file in 0..BOARD_FILES {
            match game.get_square_occupant(Location::new(file, rank)) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push_str(&empty_run.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

pub fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some(Piece::new(kind, color))
}

pub fn piece_to_fen_char(piece: Piece) -> char {
    let letter = piece.kind.letter();
    match piece.color {
        Color::White => letter.to_ascii_uppercase(),
        Color::Black => letter,
    }
}
