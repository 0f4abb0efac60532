//! Game configuration loaded from JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{Error, Result};
use crate::mcts::{SearchParams, DEFAULT_MOVETIME};

/// Settings for one human-vs-engine game. Fields missing from the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Engine thinking time per move, in milliseconds.
    pub movetime_ms: u64,
    pub exploration: f64,
    pub seed: Option<u64>,
    /// Side played by the human.
    pub human: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            movetime_ms: DEFAULT_MOVETIME.as_millis() as u64,
            exploration: std::f64::consts::SQRT_2,
            seed: None,
            human: Player::One,
        }
    }
}

impl GameConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(Error::Config { message: format!("exploration must be finite and >= 0, got {}", self.exploration) });
        }
        Ok(())
    }

    pub fn board(&self) -> Result<Board> {
        Board::new(self.width, self.height)
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            movetime: Duration::from_millis(self.movetime_ms),
            max_iterations: None,
            exploration: self.exploration,
            seed: self.seed,
        }
    }
}
