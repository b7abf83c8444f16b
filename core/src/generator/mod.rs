use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait PuzzleGenerator {
    fn generate(self, config: PuzzleConfig, alphabet: &Alphabet) -> Result<Puzzle>;
}

/// Shape of a puzzle instance: grid side length and how many cells differ.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub size: Coord,
    pub differences: CellCount,
}

impl PuzzleConfig {
    pub const MIN_SIZE: Coord = 2;

    pub fn new(size: Coord, differences: CellCount) -> Result<Self> {
        let config = Self { size, differences };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < Self::MIN_SIZE {
            return Err(GameError::InvalidSize);
        }
        if self.differences < 1 || self.differences > self.total_cells() {
            return Err(GameError::InvalidDifferenceCount);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

/// Generates a puzzle from a seed, the same seed always giving the same puzzle.
pub fn generate_puzzle(
    size: Coord,
    alphabet: &Alphabet,
    differences: CellCount,
    seed: u64,
) -> Result<Puzzle> {
    RandomPuzzleGenerator::new(seed).generate(PuzzleConfig::new(size, differences)?, alphabet)
}
