use std::path::PathBuf;

use clap::Parser;

use crate::error::GameError;
use crate::game_loop::DEFAULT_FPS;
use crate::high_score;

#[derive(Parser, Debug, Clone)]
#[command(name = "alien_invasion")]
#[command(about = "Shoot down descending alien waves in your terminal")]
pub struct Config {
    /// File holding the persisted high score
    /// [default: $HOME/.alien_invasion_score]
    #[arg(long)]
    pub high_score_file: Option<PathBuf>,

    /// Directory with optional text-art sprites (<name>.txt)
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Target ticks per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.fps == 0 {
            return Err(GameError::Config("--fps must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file
            .clone()
            .unwrap_or_else(high_score::default_path)
    }
}
