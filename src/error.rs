use thiserror::Error;

use crate::high_score::HighScoreError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    HighScore(#[from] HighScoreError),

    #[error("invalid configuration: {0}")]
    Config(String),
}
