use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ivory_chess::chess_errors::ChessResult;
use ivory_chess::engines::engine_config::{Difficulty, EngineConfig, EngineKind};
use ivory_chess::game_state::chess_types::Color;
use ivory_chess::game_state::game_state::ChessGame;
use ivory_chess::move_generation::perft::perft_multi_threaded;
use ivory_chess::utils::engine_match_harness::{play_engine_match, MatchConfig};
use ivory_chess::utils::fen_parser::parse_placement;
use ivory_chess::utils::game_file::{load_game_from_path, save_game_to_path};
use ivory_chess::utils::long_algebraic::to_long_algebraic;
use ivory_chess::utils::render_game_state::render_game_state;

#[derive(Debug, Parser)]
#[command(name = "ivory_chess", version, about = "Chess rules engine and computer players")]
struct Cli {
    /// TOML file with `[minimax]` and `[mcts]` tables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preset search budgets; applied on top of the config file.
    #[arg(long, global = true, value_enum)]
    difficulty: Option<Difficulty>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Let two computer players play each other from the starting position.
    Selfplay {
        #[arg(long, value_enum, default_value = "minimax")]
        white: EngineKind,
        #[arg(long, value_enum, default_value = "mcts")]
        black: EngineKind,
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
        /// Write the finished game to this file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Count leaf positions to validate move generation.
    Perft {
        #[arg(default_value_t = 4)]
        depth: u8,
        /// Piece placement (first FEN field); the standard position if absent.
        #[arg(long)]
        placement: Option<String>,
        #[arg(long)]
        black_to_move: bool,
    },
    /// Print the moves and final board of a saved game.
    Replay { path: PathBuf },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "ivory_chess failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ChessResult<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(difficulty) = cli.difficulty {
        config.apply_difficulty(difficulty);
    }
    config.validate()?;

    match cli.command {
        Command::Selfplay {
            white,
            black,
            max_plies,
            save,
        } => {
            let mut white_ai = config.build_ai(white);
            let mut black_ai = config.build_ai(black);
            let result = play_engine_match(
                white_ai.as_mut(),
                black_ai.as_mut(),
                &MatchConfig { max_plies },
            )?;
            println!("{}", render_game_state(&result.final_game));
            println!("{}", result.played_moves_lan.join(" "));
            println!("{}", result.report());
            if let Some(path) = save {
                save_game_to_path(path, &result.final_game, result.side_to_move)?;
            }
        }
        Command::Perft {
            depth,
            placement,
            black_to_move,
        } => {
            let game = match placement {
                Some(text) => parse_placement(&text)?,
                None => ChessGame::new_game(),
            };
            let to_move = if black_to_move { Color::Black } else { Color::White };
            let started = Instant::now();
            let counts = perft_multi_threaded(&game, to_move, depth);
            info!(depth, elapsed_ms = started.elapsed().as_millis() as u64, "perft finished");
            println!("{counts:?}");
        }
        Command::Replay { path } => {
            let (game, to_move) = load_game_from_path(&path)?;
            let moves: Vec<String> = game.moves().iter().map(to_long_algebraic).collect();
            println!("{}", moves.join(" "));
            println!("{}", render_game_state(&game));
            let mut game = game;
            let (result, _) = game.generate_all_legal_moves_for_color(to_move);
            println!("{} to move: {result:?}", to_move.name());
        }
    }
    Ok(())
}
