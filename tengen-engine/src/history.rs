use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::Board;
use crate::stone::Stone;
use crate::turn::MoveRecord;

/// Captures indexed by the capturing color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// Move records paired with the board each one was played on.
///
/// `snapshots[i]` is the board before `records[i]`, and `records[i].board`
/// the board after it, so both sequences always have the same length.
#[derive(Debug, Clone)]
pub struct History {
    initial: Board,
    board: Board,
    snapshots: Vec<Board>,
    records: Vec<MoveRecord>,
}

impl History {
    pub fn new(initial: Board) -> Self {
        Self {
            board: initial.clone(),
            initial,
            snapshots: Vec::new(),
            records: Vec::new(),
        }
    }

    // -- Accessors --

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    /// The board after the last recorded ply.
    pub fn current(&self) -> &Board {
        &self.board
    }

    /// The board after `ply` plies; `0` is the starting board.
    pub fn board_at(&self, ply: usize) -> Option<&Board> {
        match ply {
            0 => Some(&self.initial),
            n => self.records.get(n - 1).map(|r| &r.board),
        }
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Capture totals summed over the retained records.
    pub fn captures(&self) -> Captures {
        let mut captures = Captures::new();
        for r in &self.records {
            captures.add(r.stone, r.captured);
        }
        captures
    }

    /// The color to move after the last record. Black starts.
    pub fn next_player(&self) -> Stone {
        self.records.last().map_or(Stone::Black, |r| r.stone.opp())
    }

    /// Number of passes at the tail of the record list.
    pub fn trailing_passes(&self) -> usize {
        self.records.iter().rev().take_while(|r| r.is_pass()).count()
    }

    /// Position of the last ply, unless that ply was a pass.
    pub fn last_play(&self) -> Option<Point> {
        self.records.last().and_then(|r| r.mv.point())
    }

    // -- Mutation --

    /// Append a record played on `before`, which must be the current board.
    pub fn push(&mut self, before: Board, record: MoveRecord) {
        debug_assert_eq!(&before, &self.board, "record not played on the current board");
        self.board = record.board.clone();
        self.snapshots.push(before);
        self.records.push(record);
    }

    /// Drop the last `plies` records and restore the board preceding the
    /// earliest dropped one. Returns how many were actually dropped; undoing
    /// an empty history does nothing.
    pub fn undo(&mut self, plies: usize) -> usize {
        let n = plies.min(self.records.len());
        if n == 0 {
            return 0;
        }

        let keep = self.records.len() - n;
        self.board = self.snapshots[keep].clone();
        self.snapshots.truncate(keep);
        self.records.truncate(keep);
        tracing::debug!(undone = n, remaining = keep, "history rewound");
        n
    }
}
