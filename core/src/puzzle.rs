use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square matrix of symbols, immutable once a puzzle is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    symbols: Array2<Symbol>,
}

impl Grid {
    pub(crate) fn from_fn(size: Coord, mut f: impl FnMut(CellPos) -> Symbol) -> Self {
        let dim = size as usize;
        let symbols = Array2::from_shape_fn((dim, dim), |(row, col)| {
            f(CellPos::new(row as Coord, col as Coord))
        });
        Self { symbols }
    }

    /// Builds a grid from rows of glyphs, mostly useful for fixed layouts in tests.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let size: Coord = rows.len().try_into().map_err(|_| GameError::InvalidSize)?;
        if size < 2 || rows.iter().any(|row| row.chars().count() != rows.len()) {
            return Err(GameError::InvalidSize);
        }
        Ok(Self::from_fn(size, |pos| {
            rows[pos.row as usize]
                .chars()
                .nth(pos.col as usize)
                .map(Symbol::new)
                .unwrap_or_default()
        }))
    }

    pub(crate) fn set(&mut self, pos: CellPos, symbol: Symbol) {
        self.symbols[pos.to_nd_index()] = symbol;
    }

    pub fn size(&self) -> Coord {
        // always square and built from a `Coord`, so this cannot truncate
        self.symbols.nrows() as Coord
    }

    pub fn get(&self, pos: CellPos) -> Option<Symbol> {
        pos.is_within(self.size()).then(|| self[pos])
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Symbol> + '_> + '_ {
        self.symbols.rows().into_iter().map(|row| row.into_iter().copied())
    }
}

impl Index<CellPos> for Grid {
    type Output = Symbol;

    fn index(&self, pos: CellPos) -> &Self::Output {
        &self.symbols[pos.to_nd_index()]
    }
}

/// A pair of grids plus the set of cells where they were made to differ.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    base: Grid,
    modified: Grid,
    differences: BTreeSet<CellPos>,
}

impl Puzzle {
    /// Assembles a puzzle from two grids, deriving the difference set by comparison.
    pub fn from_grids(base: Grid, modified: Grid) -> Result<Self> {
        if base.size() != modified.size() {
            return Err(GameError::InvalidSize);
        }
        let differences: BTreeSet<CellPos> = iter_cells(base.size())
            .filter(|&pos| base[pos] != modified[pos])
            .collect();
        if differences.is_empty() {
            return Err(GameError::InvalidDifferenceCount);
        }
        Ok(Self {
            base,
            modified,
            differences,
        })
    }

    pub(crate) fn new_unchecked(
        base: Grid,
        modified: Grid,
        differences: BTreeSet<CellPos>,
    ) -> Self {
        Self {
            base,
            modified,
            differences,
        }
    }

    pub fn size(&self) -> Coord {
        self.base.size()
    }

    pub fn base(&self) -> &Grid {
        &self.base
    }

    pub fn modified(&self) -> &Grid {
        &self.modified
    }

    pub fn differences(&self) -> &BTreeSet<CellPos> {
        &self.differences
    }

    pub fn difference_count(&self) -> CellCount {
        // bounded by the cell count of a `Coord`-sized grid
        self.differences.len() as CellCount
    }

    pub fn is_difference(&self, pos: CellPos) -> bool {
        self.differences.contains(&pos)
    }

    /// Whether the two grids show the same symbol at `pos`.
    pub fn looks_same(&self, pos: CellPos) -> bool {
        self.base[pos] == self.modified[pos]
    }

    pub fn validate_coords(&self, pos: CellPos) -> Result<CellPos> {
        if pos.is_within(self.size()) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}
