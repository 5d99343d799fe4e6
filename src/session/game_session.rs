//! Explicit game session.
//!
//! Holds everything a host needs between turns: the game, whose turn it is,
//! who controls each color, and the moves that were undone and may be redone.
//! Nothing here is global; a host owns one `GameSession` per open game.

use std::path::Path;

use tracing::{info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::ChessAi;
use crate::game_state::board_location::Location;
use crate::game_state::chess_types::{Color, GameResult};
use crate::game_state::game_state::ChessGame;
use crate::moves::chess_move::ChessMove;
use crate::search::progress::ProgressIndicator;
use crate::utils::game_file::{load_game_from_path, save_game_to_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
    Human,
    Computer,
}

/// Result of asking the computer to play the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputerTurn {
    Played(ChessMove),
    /// The game is already over for the side to move.
    GameOver(GameResult),
    /// The AI produced no move; the side to move is now human-controlled.
    HandedToHuman,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    game: ChessGame,
    whose_turn: Color,
    players: [PlayerType; 2],
    redo_stack: Vec<ChessMove>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Standard starting position, White to move, both sides human.
    pub fn new() -> Self {
        Self {
            game: ChessGame::new_game(),
            whose_turn: Color::White,
            players: [PlayerType::Human; 2],
            redo_stack: Vec::new(),
        }
    }

    /// Starts over from the standard position. Player types are kept.
    pub fn reset(&mut self) {
        self.game.reset();
        self.whose_turn = Color::White;
        self.redo_stack.clear();
        info!("new game");
    }

    #[inline]
    pub fn game(&self) -> &ChessGame {
        &self.game
    }

    #[inline]
    pub fn whose_turn(&self) -> Color {
        self.whose_turn
    }

    #[inline]
    pub fn player_type(&self, color: Color) -> PlayerType {
        self.players[color.index()]
    }

    pub fn set_player_type(&mut self, color: Color, player: PlayerType) {
        self.players[color.index()] = player;
    }

    #[inline]
    pub fn is_computer_turn(&self) -> bool {
        self.player_type(self.whose_turn) == PlayerType::Computer
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Legal moves and position classification for the side to move.
    pub fn legal_moves(&mut self) -> (GameResult, Vec<ChessMove>) {
        self.game.generate_all_legal_moves_for_color(self.whose_turn)
    }

    /// Legal moves with the given endpoints. More than one means the host
    /// must ask which promotion was meant.
    pub fn legal_moves_between(
        &mut self,
        source: Location,
        destination: Location,
    ) -> Vec<ChessMove> {
        let (_, moves) = self.legal_moves();
        moves
            .into_iter()
            .filter(|mv| mv.source == source && mv.destination == destination)
            .collect()
    }

    /// Plays `mv` for the side to move if it is legal, then passes the turn.
    /// A new move discards any redo history.
    pub fn make_move(&mut self, mv: &ChessMove) -> ChessResult<()> {
        let (_, legal) = self.legal_moves();
        let chosen = legal
            .into_iter()
            .find(|candidate| candidate.same_action(mv))
            .ok_or_else(|| {
                ChessError::IllegalMove(format!("{mv} is not legal for {}", self.whose_turn.name()))
            })?;
        self.game.push_move(chosen);
        self.whose_turn = self.whose_turn.opposite();
        self.redo_stack.clear();
        Ok(())
    }

    /// Takes back the last move. Both colors become human-controlled so the
    /// computer does not immediately replay the position. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> ChessResult<bool> {
        if self.game.get_num_moves() == 0 {
            return Ok(false);
        }
        let mv = self.game.try_pop_move()?;
        self.redo_stack.push(mv);
        self.whose_turn = self.whose_turn.opposite();
        self.players = [PlayerType::Human; 2];
        Ok(true)
    }

    /// Replays the most recently undone move. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> ChessResult<bool> {
        let Some(mv) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = self.game.try_push_move(mv.clone()) {
            self.redo_stack.push(mv);
            return Err(err.into());
        }
        self.whose_turn = self.whose_turn.opposite();
        Ok(true)
    }

    /// Asks `ai` for the side to move and plays its answer. A cancelled or
    /// empty search hands the side to move to human control instead of
    /// failing.
    pub fn play_computer_turn(
        &mut self,
        ai: &mut dyn ChessAi,
        progress: &mut dyn ProgressIndicator,
    ) -> ChessResult<ComputerTurn> {
        let (result, _) = self.legal_moves();
        if result.is_terminal() {
            return Ok(ComputerTurn::GameOver(result));
        }

        let color = self.whose_turn;
        match ai.calculate_recommended_move(color, &mut self.game, progress) {
            Some(mv) => {
                self.make_move(&mv)?;
                info!(ai = ai.name(), color = color.name(), "{mv}");
                Ok(ComputerTurn::Played(mv))
            }
            None => {
                warn!(
                    ai = ai.name(),
                    color = color.name(),
                    "no move from ai, handing turn to human"
                );
                self.set_player_type(color, PlayerType::Human);
                Ok(ComputerTurn::HandedToHuman)
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ChessResult<()> {
        save_game_to_path(path, &self.game, self.whose_turn)
    }

    /// Replaces the session's game with the saved one. On failure the
    /// session is reset to a fresh game and the error is returned.
    pub fn load(&mut self, path: impl AsRef<Path>) -> ChessResult<()> {
        match load_game_from_path(path) {
            Ok((game, whose_turn)) => {
                self.game = game;
                self.whose_turn = whose_turn;
                self.redo_stack.clear();
                Ok(())
            }
            Err(err) => {
                warn!(%err, "load failed, starting a new game");
                self.reset();
                Err(err)
            }
        }
    }
}
