use crate::Point;
use crate::board::Board;

/// A maximal 4-connected set of same-colored stones and its liberties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub stones: Vec<Point>,
    pub liberties: Vec<Point>,
}

impl Group {
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// A group with no liberties is captured.
    pub fn is_dead(&self) -> bool {
        !self.stones.is_empty() && self.liberties.is_empty()
    }
}

/// Collect the group containing `point` and its distinct liberties.
///
/// Returns an empty group for an empty or off-board point. Each cell is
/// visited at most once.
pub fn group_and_liberties(board: &Board, point: Point) -> Group {
    let mut visited = vec![false; board.cells().len()];
    let stones = group_from(board, point, &mut visited);
    let liberties = liberties_of(board, &stones);
    Group { stones, liberties }
}

/// Flood-fill the chain at `point`, marking stones in a caller-owned visited
/// array so several chains can be collected without revisiting cells.
pub(crate) fn group_from(board: &Board, point: Point, visited: &mut [bool]) -> Vec<Point> {
    let Some(stone) = board.get(point) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut stack = vec![point];

    while let Some(p) = stack.pop() {
        let vi = board.idx(p);
        if visited[vi] {
            continue;
        }
        visited[vi] = true;
        result.push(p);
        for n in board.neighbors(p) {
            if board.get(n) == Some(stone) && !visited[board.idx(n)] {
                stack.push(n);
            }
        }
    }

    result
}

/// Distinct empty points adjacent to any stone of `stones`.
pub(crate) fn liberties_of(board: &Board, stones: &[Point]) -> Vec<Point> {
    let mut seen = vec![false; board.cells().len()];
    let mut libs = Vec::new();
    for &p in stones {
        for n in board.neighbors(p) {
            let ni = board.idx(n);
            if !seen[ni] && board.get(n).is_none() {
                seen[ni] = true;
                libs.push(n);
            }
        }
    }
    libs
}

/// Does the chain at `point` touch at least one empty point? Stops at the first one.
pub(crate) fn has_liberty(board: &Board, point: Point) -> bool {
    let Some(stone) = board.get(point) else {
        return false;
    };

    let mut visited = vec![false; board.cells().len()];
    let mut stack = vec![point];
    while let Some(p) = stack.pop() {
        let vi = board.idx(p);
        if visited[vi] {
            continue;
        }
        visited[vi] = true;
        for n in board.neighbors(p) {
            match board.get(n) {
                None => return true,
                Some(s) if s == stone && !visited[board.idx(n)] => stack.push(n),
                _ => {}
            }
        }
    }
    false
}
