#![no_std]

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

pub use curriculum::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use progress::*;
pub use puzzle::*;
pub use settings::*;
pub use storage::*;
pub use symbols::*;
pub use types::*;

mod curriculum;
mod engine;
mod error;
mod generator;
mod progress;
mod puzzle;
mod settings;
mod storage;
mod symbols;
mod types;

/// Rule set a session is played under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Mistakes are only feedback, the puzzle can never be lost.
    Zen,
    /// Mistakes count against the error budget.
    Normal,
    /// Error budget plus a countdown that correct finds extend.
    TimeChallenge,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zen => "Zen",
            Self::Normal => "Normal",
            Self::TimeChallenge => "Time Challenge",
        }
    }

    pub const fn counts_mistakes(self) -> bool {
        !matches!(self, Self::Zen)
    }

    pub const fn is_timed(self) -> bool {
        matches!(self, Self::TimeChallenge)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to generate a puzzle and run a session on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub differences: CellCount,
    /// Mistakes allowed before losing, zero meaning no limit.
    pub error_budget: CellCount,
    pub mode: Mode,
    pub time_limit_secs: u32,
}

impl GameConfig {
    pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;

    pub const fn puzzle_config(&self) -> PuzzleConfig {
        PuzzleConfig {
            size: self.size,
            differences: self.differences,
        }
    }

    /// Generates a fresh puzzle for this configuration.
    pub fn generate(&self, alphabet: &Alphabet, seed: u64) -> Result<Puzzle> {
        RandomPuzzleGenerator::new(seed).generate(self.puzzle_config(), alphabet)
    }
}
