use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ai::Difficulty;
use crate::error::GoError;
use crate::stone::Stone;

pub const STANDARD_SIZES: [u8; 3] = [9, 13, 19];
pub const MIN_SIZE: u8 = 5;
pub const MAX_SIZE: u8 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans sharing the board.
    #[default]
    Local,
    /// A human against the automated player.
    Ai,
}

impl GameMode {
    /// Plies taken back by one undo request.
    pub fn undo_plies(self) -> usize {
        match self {
            GameMode::Local => 1,
            GameMode::Ai => 2,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Local => write!(f, "local"),
            GameMode::Ai => write!(f, "ai"),
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(GameMode::Local),
            "ai" => Ok(GameMode::Ai),
            _ => Err(format!("unknown mode: {s}")),
        }
    }
}

/// Settings for a single game. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub board_size: u8,
    pub komi: f64,
    pub komi_color: Stone,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub human_color: Stone,
    /// Seconds per move for the clock; 0 disables it.
    pub time_per_move: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: 9,
            komi: 6.5,
            komi_color: Stone::White,
            mode: GameMode::Local,
            difficulty: Difficulty::Medium,
            human_color: Stone::Black,
            time_per_move: 30,
        }
    }
}

impl GameSettings {
    pub fn from_json(json: &str) -> Result<Self, GoError> {
        let settings: GameSettings =
            serde_json::from_str(json).map_err(|e| GoError::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), GoError> {
        validate_board_size(self.board_size)?;
        if !self.komi.is_finite() {
            return Err(GoError::InvalidConfig(format!(
                "komi must be finite, got {}",
                self.komi
            )));
        }
        Ok(())
    }

    /// The automated player's color, in ai mode.
    pub fn ai_color(&self) -> Option<Stone> {
        match self.mode {
            GameMode::Ai => Some(self.human_color.opp()),
            GameMode::Local => None,
        }
    }
}

/// Boards must be odd and between `MIN_SIZE` and `MAX_SIZE`.
pub fn validate_board_size(size: u8) -> Result<(), GoError> {
    if size < MIN_SIZE || size > MAX_SIZE || size.is_multiple_of(2) {
        return Err(GoError::UnsupportedBoardSize(size));
    }
    Ok(())
}
