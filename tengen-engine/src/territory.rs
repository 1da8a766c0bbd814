use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::history::Captures;
use crate::stone::Stone;

/// Per-point ownership of the empty regions of `board`.
///
/// Returns a flat array in the board's layout where `1` marks Black
/// territory, `-1` White territory and `0` stones, dame or unbordered
/// regions. A region belongs to a color only if every stone bordering it
/// has that color. Every cell is visited once.
pub fn ownership(board: &Board) -> Vec<i8> {
    let cells = board.cells();
    let mut owners = vec![0i8; cells.len()];
    let mut visited = vec![false; cells.len()];

    for start in board.points() {
        let si = board.idx(start);
        if visited[si] || cells[si] != 0 {
            continue;
        }

        // Flood-fill this empty region
        let mut region = Vec::new();
        let mut border_colors: u8 = 0; // bit 0 = Black seen, bit 1 = White seen
        let mut stack = vec![start];

        while let Some(p) = stack.pop() {
            let pi = board.idx(p);
            if visited[pi] {
                continue;
            }
            visited[pi] = true;
            region.push(pi);

            for n in board.neighbors(p) {
                let ni = board.idx(n);
                match Stone::from_cell(cells[ni]) {
                    Some(Stone::Black) => border_colors |= 1,
                    Some(Stone::White) => border_colors |= 2,
                    None if !visited[ni] => stack.push(n),
                    None => {}
                }
            }
        }

        let owner = match border_colors {
            1 => 1i8,
            2 => -1i8,
            _ => 0i8,
        };
        for &pi in &region {
            owners[pi] = owner;
        }
    }

    owners
}

/// Count of territory points per color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub black: u32,
    pub white: u32,
}

pub fn territory(board: &Board) -> Territory {
    let mut t = Territory::default();
    for o in ownership(board) {
        match o {
            1 => t.black += 1,
            -1 => t.white += 1,
            _ => {}
        }
    }
    t
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

/// Territory and captured stones for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub territory: u32,
    pub captures: u32,
}

impl PlayerPoints {
    pub fn total(&self) -> u32 {
        self.territory + self.captures
    }
}

/// Full score breakdown for both players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    pub black: PlayerPoints,
    pub white: PlayerPoints,
    pub komi: f64,
    pub komi_color: Stone,
    pub winner: Winner,
}

impl GameScore {
    pub fn black_total(&self) -> f64 {
        self.total(Stone::Black)
    }

    pub fn white_total(&self) -> f64 {
        self.total(Stone::White)
    }

    pub fn total(&self, stone: Stone) -> f64 {
        let points = match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        };
        let komi = if stone == self.komi_color { self.komi } else { 0.0 };
        points.total() as f64 + komi
    }

    pub fn result(&self) -> String {
        format_result(self.black_total(), self.white_total())
    }
}

/// Score `board` by territory plus captures, with `komi` added to `komi_color`.
///
/// The winner is the strictly higher total; equal totals are a draw.
pub fn score(board: &Board, captures: &Captures, komi: f64, komi_color: Stone) -> GameScore {
    let t = territory(board);
    let mut gs = GameScore {
        black: PlayerPoints {
            territory: t.black,
            captures: captures.get(Stone::Black),
        },
        white: PlayerPoints {
            territory: t.white,
            captures: captures.get(Stone::White),
        },
        komi,
        komi_color,
        winner: Winner::Draw,
    };

    let (b, w) = (gs.black_total(), gs.white_total());
    gs.winner = if b > w {
        Winner::Black
    } else if w > b {
        Winner::White
    } else {
        Winner::Draw
    };
    gs
}

/// Format the game result string from final scores.
///
/// Returns "B+{diff}", "W+{diff}", or "Draw".
pub fn format_result(black_score: f64, white_score: f64) -> String {
    let diff = black_score - white_score;
    if diff > 0.0 {
        format!("B+{}", diff)
    } else if diff < 0.0 {
        format!("W+{}", -diff)
    } else {
        "Draw".to_string()
    }
}
