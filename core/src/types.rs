use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid sizes and positions.
pub type Coord = u8;

/// Count type used for difference counts and total-cell counts.
pub type CellCount = u16;

/// Position of a cell inside a square grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: Coord,
    pub col: Coord,
}

impl CellPos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Position of the `index`-th cell when the grid is flattened row by row.
    pub const fn from_flat_index(index: usize, size: Coord) -> Self {
        let size = size as usize;
        Self {
            row: (index / size) as Coord,
            col: (index % size) as Coord,
        }
    }

    pub const fn flat_index(self, size: Coord) -> usize {
        self.row as usize * size as usize + self.col as usize
    }

    pub const fn is_within(self, size: Coord) -> bool {
        self.row < size && self.col < size
    }
}

impl From<(Coord, Coord)> for CellPos {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for CellPos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every position of a `size`×`size` grid in row-major order.
pub fn iter_cells(size: Coord) -> impl Iterator<Item = CellPos> {
    (0..size).flat_map(move |row| (0..size).map(move |col| CellPos::new(row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_index_matches_row_major_order() {
        let size = 5;
        for (i, pos) in iter_cells(size).enumerate() {
            assert_eq!(pos.flat_index(size), i);
            assert_eq!(CellPos::from_flat_index(i, size), pos);
        }
    }

    #[test]
    fn bounds_check_is_exclusive() {
        assert!(CellPos::new(3, 3).is_within(4));
        assert!(!CellPos::new(4, 0).is_within(4));
        assert!(!CellPos::new(0, 4).is_within(4));
    }
}
