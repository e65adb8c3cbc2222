/// High-score persistence: a single integer in a text file.

use std::fs;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum HighScoreError {
    #[error("failed to access high score file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("high score file {path} does not hold an integer: {source}")]
    Parse {
        path: PathBuf,
        source: ParseIntError,
    },
}

pub trait HighScoreStore {
    /// The stored high score, or 0 when nothing usable is stored.
    fn load(&self) -> u32;

    /// Overwrite the stored value.
    fn save(&mut self, score: u32) -> Result<(), HighScoreError>;
}

/// Stores the high score as decimal text in one file.
#[derive(Clone, Debug)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, surfacing why it failed.
    pub fn read(&self) -> Result<u32, HighScoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        text.trim().parse().map_err(|source| HighScoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        match self.read() {
            Ok(score) => {
                debug!(score, path = %self.path.display(), "loaded high score");
                score
            }
            Err(HighScoreError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "no high score file yet");
                0
            }
            Err(e) => {
                warn!("{e}; starting from 0");
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(score, path = %self.path.display(), "saved high score");
        Ok(())
    }
}

/// Default location: `$HOME/.alien_invasion_score`, or `high_score.txt` in
/// the working directory when `HOME` is unset.
pub fn default_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".alien_invasion_score"),
        None => PathBuf::from("high_score.txt"),
    }
}
