use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Point;
use crate::board::Board;
use crate::stone::Stone;

/// What a player does on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Play(Point),
    Pass,
}

impl Move {
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Play(p) => Some(*p),
            Move::Pass => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play((col, row)) => write!(f, "play {col},{row}"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// One ply of a game, with the board it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub stone: Stone,
    pub mv: Move,
    pub timestamp: DateTime<Utc>,
    pub captured: u32,
    pub board: Board,
}

impl MoveRecord {
    pub fn play(stone: Stone, point: Point, captured: u32, board: Board) -> Self {
        MoveRecord {
            stone,
            mv: Move::Play(point),
            timestamp: Utc::now(),
            captured,
            board,
        }
    }

    /// A pass keeps the board it was played on.
    pub fn pass(stone: Stone, board: Board) -> Self {
        MoveRecord {
            stone,
            mv: Move::Pass,
            timestamp: Utc::now(),
            captured: 0,
            board,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.mv.is_pass()
    }
}
