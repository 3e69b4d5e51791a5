use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::GameError;

pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

/// Best score ever reached, kept as a single decimal number in a text file.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file counts as 0. A file that exists but doesn't parse is an error.
    pub fn load(&self) -> Result<u32, GameError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        contents.trim().parse().map_err(|source| GameError::CorruptHighScore {
            path: self.path.clone(),
            source,
        })
    }

    /// Stores `score` if it beats the recorded best and returns the best after the update.
    pub fn record(&self, score: u32) -> Result<u32, GameError> {
        let previous = self.load()?;
        if score <= previous {
            return Ok(previous);
        }

        fs::write(&self.path, score.to_string())?;
        info!("New high score {} (was {}) written to {}", score, previous, self.path.display());
        Ok(score)
    }
}
