use core::fmt;
use serde::{Deserialize, Serialize};

/// Single grid axis, used for row/column indices and board dimensions.
pub type Coord = u8;

/// Count type for cells, mines and flags.
pub type CellCount = u16;

/// A cell position on the board, addressed row first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: Coord,
    pub col: Coord,
}

impl Pos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    pub const fn to_nd_index(self) -> [usize; 2] {
        [self.row as usize, self.col as usize]
    }

    /// Whether `other` is one of the (up to 8) cells touching this one.
    pub const fn touches(self, other: Pos) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && (dr | dc) != 0
    }
}

impl From<(Coord, Coord)> for Pos {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub const fn area(rows: Coord, cols: Coord) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn offset(center: Pos, (dr, dc): (i8, i8), (rows, cols): (Coord, Coord)) -> Option<Pos> {
    let row = center.row.checked_add_signed(dr)?;
    if row >= rows {
        return None;
    }

    let col = center.col.checked_add_signed(dc)?;
    if col >= cols {
        return None;
    }

    Some(Pos::new(row, col))
}

/// Iterates the in-bounds neighbors of a cell. Edge and corner cells yield fewer than 8.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Pos,
    bounds: (Coord, Coord),
    next: usize,
}

impl Neighbors {
    pub fn new(center: Pos, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            next: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(pos) = offset(self.center, delta, self.bounds) {
                return Some(pos);
            }
        }
        None
    }
}

/// Row-major walk over every position of a `rows`×`cols` grid.
pub fn positions(rows: Coord, cols: Coord) -> impl Iterator<Item = Pos> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| Pos::new(row, col)))
}
