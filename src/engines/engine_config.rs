//! Engine configuration.
//!
//! Every knob the AIs read lives here and can be loaded from TOML. Missing
//! fields fall back to defaults, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! [minimax]
//! max_depth = 4
//!
//! [mcts]
//! max_iterations = 200
//! worker_threads = 4
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_mcts::MctsAi;
use crate::engines::engine_minimax::MinimaxAi;
use crate::engines::engine_random::RandomAi;
use crate::engines::engine_trait::ChessAi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Minimax,
    Mcts,
    Random,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Plies searched below the root.
    pub max_depth: u32,
    pub alpha_beta_pruning: bool,
    /// Seeds the tie-breaking RNG; random when absent.
    pub seed: Option<u64>,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            alpha_beta_pruning: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    pub max_iterations: Option<u32>,
    pub max_time_seconds: Option<f64>,
    /// UCB exploration weight `C`.
    pub exploration_constant: f64,
    /// Rollouts stop once `|evaluation|` exceeds this.
    pub evaluation_threshold: i32,
    pub max_rollout_plies: u32,
    /// Rollout worker threads; 0 runs rollouts on the searching thread.
    pub worker_threads: usize,
    /// Rollout games each worker plays per iteration.
    pub rollouts_per_worker: u32,
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_iterations: Some(40),
            max_time_seconds: None,
            exploration_constant: std::f64::consts::SQRT_2,
            evaluation_threshold: 150,
            max_rollout_plies: 120,
            worker_threads: 0,
            rollouts_per_worker: 1,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// `max_time_seconds` as a `Duration`, rejecting negative, NaN and
    /// out-of-range values.
    pub fn time_budget(&self) -> ChessResult<Option<Duration>> {
        let Some(seconds) = self.max_time_seconds else {
            return Ok(None);
        };
        Duration::try_from_secs_f64(seconds).map(Some).map_err(|_| {
            ChessError::Config(format!(
                "mcts.max_time_seconds must be a representable non-negative number, got {seconds}"
            ))
        })
    }

    pub fn validate(&self) -> ChessResult<()> {
        if self.max_iterations.is_some() && self.max_time_seconds.is_some() {
            return Err(ChessError::Config(
                "mcts.max_iterations and mcts.max_time_seconds are mutually exclusive".to_owned(),
            ));
        }
        self.time_budget()?;
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(ChessError::Config(format!(
                "mcts.exploration_constant must be a non-negative number, got {}",
                self.exploration_constant
            )));
        }
        if self.worker_threads > 0 && self.rollouts_per_worker == 0 {
            return Err(ChessError::Config(
                "mcts.rollouts_per_worker must be at least 1 when workers are enabled".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub minimax: MinimaxConfig,
    pub mcts: MctsConfig,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> ChessResult<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ChessResult<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> ChessResult<()> {
        self.mcts.validate()
    }

    /// Overrides the search budgets with a difficulty preset.
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        let (depth, iterations) = match difficulty {
            Difficulty::Easy => (2, 30),
            Difficulty::Medium => (3, 40),
            Difficulty::Hard => (4, 50),
        };
        self.minimax.max_depth = depth;
        self.mcts.max_iterations = Some(iterations);
        self.mcts.max_time_seconds = None;
    }

    pub fn build_ai(&self, kind: EngineKind) -> Box<dyn ChessAi> {
        match kind {
            EngineKind::Minimax => Box::new(MinimaxAi::new(self.minimax.clone())),
            EngineKind::Mcts => Box::new(MctsAi::new(self.mcts.clone())),
            EngineKind::Random => Box::new(RandomAi::new(self.minimax.seed)),
        }
    }
}
