use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("high score file {path} does not hold a valid score")]
    CorruptHighScore {
        path: PathBuf,
        #[source]
        source: ParseIntError,
    },
    #[error("board {width}x{height} cannot be split into cells of size {cell_size}")]
    InvalidBoard { width: i32, height: i32, cell_size: i32 },
    #[error("terminal is {actual:?} but the board needs at least {needed:?} (columns, rows)")]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
