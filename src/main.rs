mod difficulty;
mod error;
mod food;
mod frontend;
mod game;
mod geometry;
mod high_score;
mod obstacles;
mod session;
mod snake;
mod term;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::frontend::FrameClock;
use crate::game::SnakeGame;
use crate::geometry::Board;
use crate::high_score::{HighScoreStore, DEFAULT_HIGH_SCORE_FILE};
use crate::term::TermManager;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake with obstacles, three difficulty tiers and a saved high score")]
struct Cli {
    /// Board width in board units
    #[arg(long, default_value_t = Board::DEFAULT_WIDTH, value_parser = clap::value_parser!(i32).range(1..))]
    width: i32,

    /// Board height in board units
    #[arg(long, default_value_t = Board::DEFAULT_HEIGHT, value_parser = clap::value_parser!(i32).range(1..))]
    height: i32,

    /// Size of one grid cell; width and height must be multiples of it
    #[arg(long, default_value_t = Board::DEFAULT_CELL_SIZE, value_parser = clap::value_parser!(i32).range(1..))]
    cell_size: i32,

    /// File holding the best score
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Log destination (the terminal itself is taken by the game)
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file).context("Failed to initialize logger")?;

    let board = Board::new(cli.width, cli.height, cli.cell_size)?;
    let high_scores = HighScoreStore::new(cli.high_score_file);
    info!("Starting on a {}x{} board, high scores in {}", board.columns(), board.rows(), high_scores.path().display());

    let term = TermManager::new(&board)?;
    let mut game = SnakeGame::new(term, FrameClock::new(), board, high_scores);
    game.run_on_screen().context("Game stopped with an error")?;

    info!("Exiting");
    Ok(())
}
