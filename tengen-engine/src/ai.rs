//! Heuristic move selection for the automated opponent.
//!
//! A single-ply greedy evaluator: gather empty points near existing stones,
//! keep the legal ones, score each with a few cheap features plus random
//! jitter, and pick at random among the best few. There is no search.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Point;
use crate::board::Board;
use crate::ko::KoGuard;
use crate::play::try_play;
use crate::star_points::corner_points;
use crate::stone::Stone;
use crate::turn::Move;

/// Below this many nearby points the pool is topped up with strategic points.
const MIN_POOL: usize = 10;

const CAPTURE_WEIGHT: i32 = 25;
const FRIENDLY_NEIGHBOR_WEIGHT: i32 = 10;
const CENTER_DISTANCE_WEIGHT: i32 = 2;
const JITTER: i32 = 8;
const EASY_EXTRA_JITTER: i32 = 20;
const HARD_CORNER_BONUS: i32 = 15;
const HARD_EDGE_BONUS: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// How far from existing stones candidates are gathered.
    pub fn radius(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }

    /// How many of the best-scored candidates the final pick is drawn from.
    pub fn top_k(self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 3,
            Difficulty::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("unknown difficulty: {s}")),
        }
    }
}

/// A legal candidate move and its heuristic score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub point: Point,
    pub captured: usize,
    pub score: i32,
}

/// Choose a move for `stone`, or pass when nothing legal is on offer.
///
/// The pick is uniform among the `top_k` best candidates, so the same
/// position does not always get the same answer. Pass a seeded `rng` for
/// reproducible choices.
pub fn pick_move<R: Rng + ?Sized>(
    board: &Board,
    stone: Stone,
    difficulty: Difficulty,
    ko: &KoGuard,
    rng: &mut R,
) -> Move {
    let ranked = rank_candidates(board, stone, difficulty, ko, rng);
    if ranked.is_empty() {
        tracing::debug!(%stone, "no legal candidate, passing");
        return Move::Pass;
    }

    let k = difficulty.top_k().min(ranked.len());
    let choice = &ranked[rng.gen_range(0..k)];
    tracing::debug!(
        %stone,
        %difficulty,
        point = ?choice.point,
        score = choice.score,
        candidates = ranked.len(),
        "automated move chosen"
    );
    Move::Play(choice.point)
}

/// Legal candidates for `stone`, best first. Equal scores keep board order.
pub fn rank_candidates<R: Rng + ?Sized>(
    board: &Board,
    stone: Stone,
    difficulty: Difficulty,
    ko: &KoGuard,
    rng: &mut R,
) -> Vec<Candidate> {
    let pool = candidate_pool(board, difficulty);
    tracing::trace!(pool = pool.len(), "candidate pool gathered");

    let mut ranked: Vec<Candidate> = pool
        .into_iter()
        .filter_map(|point| {
            let placement = try_play(board, point, stone, ko).ok()?;
            let score = evaluate(board, point, stone, placement.captured, difficulty, rng);
            Some(Candidate {
                point,
                captured: placement.captured,
                score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Empty points within `difficulty.radius()` (Chebyshev) of any stone, in
/// board order, topped up with the center and corner star points when fewer
/// than `MIN_POOL` are found. No point appears twice.
pub fn candidate_pool(board: &Board, difficulty: Difficulty) -> Vec<Point> {
    let size = board.size();
    let r = difficulty.radius() as i16;
    let mut marked = vec![false; board.cells().len()];

    for p in board.points().filter(|&p| board.get(p).is_some()) {
        for dy in -r..=r {
            for dx in -r..=r {
                let col = p.0 as i16 + dx;
                let row = p.1 as i16 + dy;
                if col < 0 || row < 0 || col >= size as i16 || row >= size as i16 {
                    continue;
                }
                let q = (col as u8, row as u8);
                if board.get(q).is_none() {
                    marked[board.idx(q)] = true;
                }
            }
        }
    }

    let mut pool: Vec<Point> = board.points().filter(|&p| marked[board.idx(p)]).collect();

    if pool.len() < MIN_POOL {
        let mid = size / 2;
        for p in std::iter::once((mid, mid)).chain(corner_points(size)) {
            if board.on_board(p) && board.get(p).is_none() && !marked[board.idx(p)] {
                marked[board.idx(p)] = true;
                pool.push(p);
            }
        }
    }

    pool
}

fn evaluate<R: Rng + ?Sized>(
    board: &Board,
    point: Point,
    stone: Stone,
    captured: usize,
    difficulty: Difficulty,
    rng: &mut R,
) -> i32 {
    let friendly = board
        .neighbors(point)
        .iter()
        .filter(|&&n| board.get(n) == Some(stone))
        .count() as i32;

    let mut score = CAPTURE_WEIGHT * captured as i32 + FRIENDLY_NEIGHBOR_WEIGHT * friendly
        - CENTER_DISTANCE_WEIGHT * center_distance(point, board.size())
        + rng.gen_range(0..JITTER);

    match difficulty {
        Difficulty::Easy => score += rng.gen_range(0..EASY_EXTRA_JITTER),
        Difficulty::Medium => {}
        Difficulty::Hard => score += edge_bonus(point, board.size()),
    }
    score
}

/// Manhattan distance from the center point.
fn center_distance((col, row): Point, size: u8) -> i32 {
    let mid = (size / 2) as i32;
    (col as i32 - mid).abs() + (row as i32 - mid).abs()
}

fn edge_bonus((col, row): Point, size: u8) -> i32 {
    let last = size.saturating_sub(1);
    let on_col_edge = col == 0 || col == last;
    let on_row_edge = row == 0 || row == last;
    match (on_col_edge, on_row_edge) {
        (true, true) => HARD_CORNER_BONUS,
        (true, false) | (false, true) => HARD_EDGE_BONUS,
        (false, false) => 0,
    }
}
