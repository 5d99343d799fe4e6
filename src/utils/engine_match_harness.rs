//! Minimal head-to-head harness for local testing.
//!
//! Runs two `ChessAi` implementations against each other on one game, with
//! no host in between, and reports the outcome, the moves and time per side.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::ChessAi;
use crate::game_state::chess_types::{Color, GameResult};
use crate::game_state::game_state::ChessGame;
use crate::search::progress::NullProgress;
use crate::utils::long_algebraic::to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::WhiteWinCheckmate => Some(Color::White),
            MatchOutcome::BlackWinCheckmate => Some(Color::Black),
            MatchOutcome::DrawStalemate | MatchOutcome::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_plies: 300 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideStats {
    pub moves: u32,
    pub total_time_ns: u128,
}

impl SideStats {
    pub fn average_move_ms(&self) -> f64 {
        if self.moves == 0 {
            return 0.0;
        }
        self.total_time_ns as f64 / f64::from(self.moves) / 1_000_000.0
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_game: ChessGame,
    /// Side on turn in `final_game`.
    pub side_to_move: Color,
    pub played_moves_lan: Vec<String>,
    pub white: SideStats,
    pub black: SideStats,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn report(&self) -> String {
        format!(
            "outcome={:?} plies={} white_avg_ms={:.3} black_avg_ms={:.3} started={} finished={}",
            self.outcome,
            self.played_moves_lan.len(),
            self.white.average_move_ms(),
            self.black.average_move_ms(),
            self.started_at.to_rfc3339(),
            self.finished_at.to_rfc3339(),
        )
    }
}

/// Plays a match from the standard starting position.
pub fn play_engine_match(
    white: &mut dyn ChessAi,
    black: &mut dyn ChessAi,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    play_engine_match_from_game(white, black, ChessGame::new_game(), Color::White, config)
}

/// Plays a match from a caller-provided game with `to_move` on turn.
///
/// An AI that returns no move forfeits the choice to the first legal move.
/// A returned move outside the legal list is an error.
pub fn play_engine_match_from_game(
    white: &mut dyn ChessAi,
    black: &mut dyn ChessAi,
    mut game: ChessGame,
    mut to_move: Color,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    let started_at = Utc::now();
    info!(white = white.name(), black = black.name(), "match started");

    let mut played_moves_lan = Vec::new();
    let mut stats = [SideStats::default(); 2];
    let mut outcome = MatchOutcome::DrawMaxPlies;

    for _ in 0..config.max_plies {
        let (result, legal_moves) = game.generate_all_legal_moves_for_color(to_move);
        match result {
            GameResult::CheckMate => {
                outcome = match to_move {
                    Color::White => MatchOutcome::BlackWinCheckmate,
                    Color::Black => MatchOutcome::WhiteWinCheckmate,
                };
                break;
            }
            GameResult::StaleMate => {
                outcome = MatchOutcome::DrawStalemate;
                break;
            }
            GameResult::None | GameResult::Check => {}
        }

        let ai: &mut dyn ChessAi = match to_move {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let started = Instant::now();
        let recommended = ai.calculate_recommended_move(to_move, &mut game, &mut NullProgress);
        let elapsed_ns = started.elapsed().as_nanos();

        let side = &mut stats[to_move.index()];
        side.moves = side.moves.saturating_add(1);
        side.total_time_ns = side.total_time_ns.saturating_add(elapsed_ns);

        let chosen = match recommended {
            Some(mv) => legal_moves
                .iter()
                .find(|legal| legal.same_action(&mv))
                .cloned()
                .ok_or_else(|| {
                    ChessError::IllegalMove(format!("{} returned illegal move {mv}", ai.name()))
                })?,
            None => {
                warn!(ai = ai.name(), "no move returned, playing first legal move");
                match legal_moves.first() {
                    Some(mv) => mv.clone(),
                    None => break,
                }
            }
        };

        let lan = to_long_algebraic(&chosen);
        debug!(color = to_move.name(), mv = %lan, "match move");
        played_moves_lan.push(lan);
        game.push_move(chosen);
        to_move = to_move.opposite();
    }

    let result = MatchResult {
        outcome,
        final_game: game,
        side_to_move: to_move,
        played_moves_lan,
        white: stats[Color::White.index()],
        black: stats[Color::Black.index()],
        started_at,
        finished_at: Utc::now(),
    };
    info!("{}", result.report());
    Ok(result)
}
