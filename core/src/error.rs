use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid size must be at least 2")]
    InvalidSize,
    #[error("Difference count must be between 1 and the number of cells")]
    InvalidDifferenceCount,
    #[error("Alphabet needs at least two distinct symbols")]
    AlphabetTooSmall,
    #[error("At least one symbol group must be enabled")]
    EmptyAlphabet,
    #[error("Level is outside of the journey")]
    OutOfRangeLevel,
    #[error("Level has not been unlocked yet")]
    LevelLocked,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
