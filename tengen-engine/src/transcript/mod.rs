//! Move transcripts: the persisted form of a game.
//!
//! JSON follows the `{boardSize, komi, moves: [{player, x, y, isPass}]}`
//! shape; `sgf` reads and writes the same data as a simple SGF main line.

pub mod sgf;

use serde::{Deserialize, Serialize};

use crate::error::TranscriptError;
use crate::stone::Stone;
use crate::turn::Move;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub board_size: u8,
    pub komi: f64,
    pub moves: Vec<TranscriptMove>,
}

/// One transcript entry. Passes carry `x = y = -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMove {
    pub player: Stone,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub is_pass: bool,
}

impl TranscriptMove {
    pub fn new(player: Stone, mv: Move) -> Self {
        match mv {
            Move::Play((x, y)) => TranscriptMove {
                player,
                x: x as i32,
                y: y as i32,
                is_pass: false,
            },
            Move::Pass => TranscriptMove {
                player,
                x: -1,
                y: -1,
                is_pass: true,
            },
        }
    }

    /// The move this entry describes, or `None` if its coordinates cannot
    /// name a point at all. Board bounds are checked when it is played.
    pub fn to_move(&self) -> Option<Move> {
        if self.is_pass {
            return Some(Move::Pass);
        }
        let x = u8::try_from(self.x).ok()?;
        let y = u8::try_from(self.y).ok()?;
        Some(Move::Play((x, y)))
    }
}

impl Transcript {
    pub fn from_json(json: &str) -> Result<Self, TranscriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TranscriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_sgf(text: &str) -> Result<Self, TranscriptError> {
        sgf::parse(text)
    }

    pub fn to_sgf(&self) -> String {
        sgf::serialize(self)
    }
}
