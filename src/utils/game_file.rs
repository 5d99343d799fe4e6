//! Binary save-game format.
//!
//! Layout, all integers little-endian:
//!
//! 1. 64 square records in file-major order (a1, a2, ..., h8). Each is a
//!    one-byte tag, `EMPTY` or a piece tag; a piece tag is followed by its
//!    color byte (`0` black, `1` white).
//! 2. An `i32` move count, then that many move records, oldest first. A move
//!    record is its tag, source and destination as `i32` file/rank pairs,
//!    then the fields of its kind:
//!    - Capture: captured piece record.
//!    - Castle: rook source and rook destination.
//!    - Promotion: promoted-to kind tag, then the original pawn record.
//!    - CapturePromotion: the promotion fields, then the captured piece record.
//!    - EnPassant: capture location, then the captured piece record.
//! 3. One color byte for the side to move.
//!
//! Moves are stored in their applied state, so the pieces they hold off-board
//! are part of the record.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_location::Location;
use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::game_state::{Board, ChessGame};
use crate::moves::chess_move::{ChessMove, MoveKind};

pub const EMPTY: u8 = 100;
pub const PAWN: u8 = 101;
pub const KNIGHT: u8 = 102;
pub const BISHOP: u8 = 103;
pub const ROOK: u8 = 104;
pub const QUEEN: u8 = 105;
pub const KING: u8 = 106;
pub const TRAVEL: u8 = 107;
pub const CAPTURE: u8 = 108;
pub const CASTLE: u8 = 109;
pub const PROMOTION: u8 = 110;
pub const CAPTURE_AND_PROMOTE: u8 = 111;
pub const EN_PASSANT: u8 = 112;
pub const GAME: u8 = 113;

const BLACK_BYTE: u8 = 0;
const WHITE_BYTE: u8 = 1;

/// What a tag byte stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Empty,
    Piece(PieceKind),
    Travel,
    Capture,
    Castle,
    Promotion,
    CapturePromotion,
    EnPassant,
    Game,
}

/// Tag-to-record lookup used when decoding.
pub fn factory(tag: u8) -> ChessResult<Record> {
    Ok(match tag {
        EMPTY => Record::Empty,
        PAWN => Record::Piece(PieceKind::Pawn),
        KNIGHT => Record::Piece(PieceKind::Knight),
        BISHOP => Record::Piece(PieceKind::Bishop),
        ROOK => Record::Piece(PieceKind::Rook),
        QUEEN => Record::Piece(PieceKind::Queen),
        KING => Record::Piece(PieceKind::King),
        TRAVEL => Record::Travel,
        CAPTURE => Record::Capture,
        CASTLE => Record::Castle,
        PROMOTION => Record::Promotion,
        CAPTURE_AND_PROMOTE => Record::CapturePromotion,
        EN_PASSANT => Record::EnPassant,
        GAME => Record::Game,
        other => return Err(ChessError::UnknownTag(other)),
    })
}

pub fn piece_kind_tag(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Pawn => PAWN,
        PieceKind::Knight => KNIGHT,
        PieceKind::Bishop => BISHOP,
        PieceKind::Rook => ROOK,
        PieceKind::Queen => QUEEN,
        PieceKind::King => KING,
    }
}

fn move_tag(kind: &MoveKind) -> u8 {
    match kind {
        MoveKind::Travel => TRAVEL,
        MoveKind::Capture { .. } => CAPTURE,
        MoveKind::Castle { .. } => CASTLE,
        MoveKind::Promotion { .. } => PROMOTION,
        MoveKind::CapturePromotion { .. } => CAPTURE_AND_PROMOTE,
        MoveKind::EnPassant { .. } => EN_PASSANT,
    }
}

fn color_byte(color: Color) -> u8 {
    match color {
        Color::Black => BLACK_BYTE,
        Color::White => WHITE_BYTE,
    }
}

pub fn write_game<W: Write>(
    writer: &mut W,
    game: &ChessGame,
    whose_turn: Color,
) -> ChessResult<()> {
    for location in Location::all() {
        write_piece(writer, game.get_square_occupant(location))?;
    }
    let count = i32::try_from(game.get_num_moves())
        .map_err(|_| ChessError::InvalidMoveCount(i32::MAX))?;
    writer.write_all(&count.to_le_bytes())?;
    for mv in game.moves() {
        write_move(writer, mv)?;
    }
    writer.write_all(&[color_byte(whose_turn)])?;
    Ok(())
}

/// Decodes a game and the side to move, then checks that the whole history
/// unwinds cleanly on a copy of the decoded board.
pub fn read_game<R: Read>(reader: &mut R) -> ChessResult<(ChessGame, Color)> {
    let mut board = Board::default();
    for location in Location::all() {
        board.set_occupant(location, read_piece(reader)?);
    }

    let count = read_i32(reader)?;
    if count < 0 {
        return Err(ChessError::InvalidMoveCount(count));
    }
    let mut moves = Vec::with_capacity((count as usize).min(1024));
    for _ in 0..count {
        moves.push(read_move(reader)?);
    }
    let whose_turn = read_color(reader)?;

    let game = ChessGame::from_parts(board, moves);
    verify_history(&game)?;
    Ok((game, whose_turn))
}

fn verify_history(game: &ChessGame) -> ChessResult<()> {
    let mut scratch = game.clone();
    while scratch.get_num_moves() > 0 {
        let index = scratch.get_num_moves() - 1;
        scratch.try_pop_move().map_err(|err| {
            ChessError::CorruptHistory(format!("move {index} does not revert: {err}"))
        })?;
    }
    Ok(())
}

pub fn save_game_to_path(
    path: impl AsRef<Path>,
    game: &ChessGame,
    whose_turn: Color,
) -> ChessResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_game(&mut writer, game, whose_turn)?;
    writer.flush()?;
    info!(path = %path.display(), moves = game.get_num_moves(), "game saved");
    Ok(())
}

pub fn load_game_from_path(path: impl AsRef<Path>) -> ChessResult<(ChessGame, Color)> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let loaded = read_game(&mut reader)?;
    info!(path = %path.display(), moves = loaded.0.get_num_moves(), "game loaded");
    Ok(loaded)
}

fn write_piece<W: Write>(writer: &mut W, piece: Option<Piece>) -> ChessResult<()> {
    match piece {
        None => writer.write_all(&[EMPTY])?,
        Some(piece) => writer.write_all(&[piece_kind_tag(piece.kind), color_byte(piece.color)])?,
    }
    Ok(())
}

fn write_location<W: Write>(writer: &mut W, location: Location) -> ChessResult<()> {
    writer.write_all(&i32::from(location.file).to_le_bytes())?;
    writer.write_all(&i32::from(location.rank).to_le_bytes())?;
    Ok(())
}

fn write_move<W: Write>(writer: &mut W, mv: &ChessMove) -> ChessResult<()> {
    writer.write_all(&[move_tag(&mv.kind)])?;
    write_location(writer, mv.source)?;
    write_location(writer, mv.destination)?;
    match &mv.kind {
        MoveKind::Travel => {}
        MoveKind::Capture { captured } => write_piece(writer, *captured)?,
        MoveKind::Castle {
            rook_source,
            rook_destination,
        } => {
            write_location(writer, *rook_source)?;
            write_location(writer, *rook_destination)?;
        }
        MoveKind::Promotion { promote_to, pawn } => {
            writer.write_all(&[piece_kind_tag(*promote_to)])?;
            write_piece(writer, *pawn)?;
        }
        MoveKind::CapturePromotion {
            promote_to,
            pawn,
            captured,
        } => {
            writer.write_all(&[piece_kind_tag(*promote_to)])?;
            write_piece(writer, *pawn)?;
            write_piece(writer, *captured)?;
        }
        MoveKind::EnPassant {
            capture_location,
            captured,
        } => {
            write_location(writer, *capture_location)?;
            write_piece(writer, *captured)?;
        }
    }
    Ok(())
}

fn read_u8<R: Read>(reader: &mut R) -> ChessResult<u8> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

fn read_i32<R: Read>(reader: &mut R) -> ChessResult<i32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_le_bytes(bytes))
}

fn read_color<R: Read>(reader: &mut R) -> ChessResult<Color> {
    match read_u8(reader)? {
        BLACK_BYTE => Ok(Color::Black),
        WHITE_BYTE => Ok(Color::White),
        other => Err(ChessError::InvalidColor(other)),
    }
}

fn read_piece<R: Read>(reader: &mut R) -> ChessResult<Option<Piece>> {
    let tag = read_u8(reader)?;
    match factory(tag)? {
        Record::Empty => Ok(None),
        Record::Piece(kind) => Ok(Some(Piece::new(kind, read_color(reader)?))),
        _ => Err(ChessError::UnexpectedTag {
            expected: "piece",
            found: tag,
        }),
    }
}

fn read_location<R: Read>(reader: &mut R) -> ChessResult<Location> {
    let file = read_i32(reader)?;
    let rank = read_i32(reader)?;
    let location = match (i8::try_from(file), i8::try_from(rank)) {
        (Ok(file), Ok(rank)) => Location::new(file, rank),
        _ => return Err(ChessError::InvalidLocation(file, rank)),
    };
    if !location.is_valid() {
        return Err(ChessError::InvalidLocation(file, rank));
    }
    Ok(location)
}

fn read_promotion_kind<R: Read>(reader: &mut R) -> ChessResult<PieceKind> {
    let tag = read_u8(reader)?;
    match factory(tag)? {
        Record::Piece(kind) if PieceKind::PROMOTIONS.contains(&kind) => Ok(kind),
        _ => Err(ChessError::UnexpectedTag {
            expected: "promotion piece",
            found: tag,
        }),
    }
}

fn read_move<R: Read>(reader: &mut R) -> ChessResult<ChessMove> {
    let tag = read_u8(reader)?;
    let record = factory(tag)?;
    let source = read_location(reader)?;
    let destination = read_location(reader)?;
    let kind = match record {
        Record::Travel => MoveKind::Travel,
        Record::Capture => MoveKind::Capture {
            captured: read_piece(reader)?,
        },
        Record::Castle => MoveKind::Castle {
            rook_source: read_location(reader)?,
            rook_destination: read_location(reader)?,
        },
        Record::Promotion => MoveKind::Promotion {
            promote_to: read_promotion_kind(reader)?,
            pawn: read_piece(reader)?,
        },
        Record::CapturePromotion => MoveKind::CapturePromotion {
            promote_to: read_promotion_kind(reader)?,
            pawn: read_piece(reader)?,
            captured: read_piece(reader)?,
        },
        Record::EnPassant => MoveKind::EnPassant {
            capture_location: read_location(reader)?,
            captured: read_piece(reader)?,
        },
        Record::Empty | Record::Piece(_) | Record::Game => {
            return Err(ChessError::UnexpectedTag {
                expected: "move",
                found: tag,
            })
        }
    };
    Ok(ChessMove {
        source,
        destination,
        kind,
    })
}
