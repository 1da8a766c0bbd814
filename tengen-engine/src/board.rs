use std::fmt;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::Point;
use crate::error::GoError;
use crate::stone::Stone;

/// Square board of intersections stored as a flat array, row-major.
///
/// A `Board` is a value: every edit returns a new board and leaves the
/// original untouched, so history snapshots and the ko guard can keep
/// references to earlier positions. Cloning only bumps a reference count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    cells: Arc<[i8]>,
}

impl Board {
    /// An all-empty `size` x `size` board.
    pub fn empty(size: u8) -> Self {
        Board {
            size,
            cells: vec![0i8; size as usize * size as usize].into(),
        }
    }

    /// Build a board from a square matrix of cell values (1 Black, -1 White, 0 empty).
    pub fn from_rows(rows: Vec<Vec<i8>>) -> Result<Self, GoError> {
        let size = u8::try_from(rows.len()).map_err(|_| GoError::MalformedBoard)?;
        if rows.iter().any(|row| row.len() != size as usize) {
            return Err(GoError::MalformedBoard);
        }

        let cells: Vec<i8> = rows.into_iter().flatten().map(i8::signum).collect();
        Ok(Board {
            size,
            cells: cells.into(),
        })
    }

    /// Build a board from an ASCII layout. 'B' = Black, 'W' = White, anything else empty.
    pub fn from_layout(layout: &[&str]) -> Result<Self, GoError> {
        let rows = layout
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'B' => Stone::Black.to_cell(),
                        'W' => Stone::White.to_cell(),
                        _ => 0,
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    pub fn get(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            Stone::from_cell(self.cells[self.idx(point)])
        } else {
            None
        }
    }

    pub fn on_board(&self, (col, row): Point) -> bool {
        col < self.size && row < self.size
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    pub fn stone_count(&self, stone: Stone) -> usize {
        let v = stone.to_cell();
        self.cells.iter().filter(|&&c| c == v).count()
    }

    /// Every point on the board, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| (col, row)))
    }

    pub fn neighbors(&self, point: Point) -> ArrayVec<Point, 4> {
        neighbors(point, self.size)
    }

    // -- Copy-on-write edits --

    /// A copy of this board with `stone` at `point`. Off-board points leave
    /// the copy unchanged.
    pub fn with_stone(&self, point: Point, stone: Stone) -> Board {
        self.edited(|b| b.put(point, stone.to_cell()))
    }

    /// A copy of this board with every listed point emptied.
    pub fn without_stones(&self, points: &[Point]) -> Board {
        if points.is_empty() {
            return self.clone();
        }
        self.edited(|b| {
            for &p in points {
                b.put(p, 0);
            }
        })
    }

    // -- Internal helpers --

    #[inline]
    pub(crate) fn idx(&self, (col, row): Point) -> usize {
        row as usize * self.size as usize + col as usize
    }

    fn edited(&self, edit: impl FnOnce(&mut Grid<'_>)) -> Board {
        let mut cells = self.cells.to_vec();
        edit(&mut Grid {
            size: self.size,
            cells: &mut cells,
        });
        Board {
            size: self.size,
            cells: cells.into(),
        }
    }
}

/// Scratch view used while building an edited copy.
struct Grid<'a> {
    size: u8,
    cells: &'a mut [i8],
}

impl Grid<'_> {
    fn put(&mut self, (col, row): Point, v: i8) {
        if col < self.size && row < self.size {
            self.cells[row as usize * self.size as usize + col as usize] = v;
        }
    }
}

/// The up-to-four orthogonal neighbors of `point` on a `size` x `size` board.
pub fn neighbors((col, row): Point, size: u8) -> ArrayVec<Point, 4> {
    let mut result = ArrayVec::new();
    if col > 0 {
        result.push((col - 1, row));
    }
    if col + 1 < size {
        result.push((col + 1, row));
    }
    if row > 0 {
        result.push((col, row - 1));
    }
    if row + 1 < size {
        result.push((col, row + 1));
    }
    result
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let c = match self.get((col, row)) {
                    Some(stone) => stone.letter(),
                    None => '+',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
