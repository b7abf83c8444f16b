use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

/// Highest level the player may start. One past [`LAST_LEVEL`] once the journey is done.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Progress {
    current_level: Level,
}

impl Progress {
    pub const COMPLETED: Level = LAST_LEVEL + 1;

    pub fn new(current_level: Level) -> Self {
        let clamped = current_level.clamp(FIRST_LEVEL, Self::COMPLETED);
        if clamped != current_level {
            log::warn!("progress level {} out of range, using {}", current_level, clamped);
        }
        Self {
            current_level: clamped,
        }
    }

    pub fn current_level(&self) -> Level {
        self.current_level
    }

    pub fn is_journey_complete(&self) -> bool {
        self.current_level > LAST_LEVEL
    }

    pub fn status(&self, level: Level) -> LevelStatus {
        LevelStatus::of(level, self.current_level)
    }

    pub fn is_playable(&self, level: Level) -> bool {
        validate_level(level).is_ok() && self.status(level).is_playable()
    }

    /// Parameters for `level`, provided it is unlocked.
    pub fn start(&self, level: Level) -> Result<GameConfig> {
        let config = parameters_for(level)?;
        if !self.status(level).is_playable() {
            return Err(GameError::LevelLocked);
        }
        Ok(config)
    }

    /// Records a win. Only winning the current level unlocks the next one; replays
    /// of earlier levels leave progress unchanged. Returns whether it advanced.
    pub fn complete(&mut self, level: Level) -> bool {
        if level != self.current_level || self.is_journey_complete() {
            log::debug!("level {} replayed, staying at {}", level, self.current_level);
            return false;
        }
        self.current_level += 1;
        log::debug!("unlocked level {}", self.current_level);
        true
    }

    /// Moves progress forward to `level`, never backwards.
    pub fn advance_to(&mut self, level: Level) -> bool {
        let level = level.min(Self::COMPLETED);
        if level <= self.current_level {
            return false;
        }
        self.current_level = level;
        true
    }

    /// Same as [`Progress::complete`], persisting the new level when it changed.
    pub fn complete_and_save<S: KeyValueStore + ?Sized>(&mut self, level: Level, store: &mut S) -> bool {
        let advanced = self.complete(level);
        if advanced {
            self.save(store);
        }
        advanced
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current_level: FIRST_LEVEL,
        }
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        Level::deserialize(deserializer).map(Self::new)
    }
}

impl StorageKey for Progress {
    const KEY: &'static str = "spotter:journey-level";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_level() {
        let progress = Progress::load_or_default(&MemoryStore::new());
        assert_eq!(progress.current_level(), 1);
        assert!(progress.is_playable(1));
        assert!(!progress.is_playable(2));
    }

    #[test]
    fn winning_current_level_unlocks_next() {
        let mut store = MemoryStore::new();
        let mut progress = Progress::default();

        assert!(progress.complete_and_save(1, &mut store));
        assert_eq!(progress.current_level(), 2);
        assert_eq!(store.read(Progress::KEY).as_deref(), Some("2"));
        assert_eq!(Progress::load_or_default(&store), progress);
    }

    #[test]
    fn replaying_old_levels_never_moves_progress() {
        let mut progress = Progress::new(5);

        assert!(!progress.complete(3));
        assert!(!progress.complete(7));
        assert_eq!(progress.current_level(), 5);
        assert!(progress.complete(5));
        assert!(!progress.complete(5));
        assert_eq!(progress.current_level(), 6);
    }

    #[test]
    fn advance_to_is_monotonic() {
        let mut progress = Progress::new(10);
        assert!(!progress.advance_to(4));
        assert_eq!(progress.current_level(), 10);
        assert!(progress.advance_to(12));
        assert_eq!(progress.current_level(), 12);
        assert!(progress.advance_to(200));
        assert_eq!(progress.current_level(), Progress::COMPLETED);
    }

    #[test]
    fn journey_end_is_sticky() {
        let mut progress = Progress::new(LAST_LEVEL);
        assert!(progress.complete(LAST_LEVEL));
        assert!(progress.is_journey_complete());
        assert!(!progress.complete(LAST_LEVEL));
        assert_eq!(progress.status(LAST_LEVEL), LevelStatus::Completed);
    }

    #[test]
    fn locked_levels_cannot_start() {
        let progress = Progress::new(3);
        assert!(progress.start(3).is_ok());
        assert_eq!(progress.start(4), Err(GameError::LevelLocked));
        assert_eq!(progress.start(0), Err(GameError::OutOfRangeLevel));
    }

    #[test]
    fn stored_values_are_sanitized() {
        let mut store = MemoryStore::new();
        store.write(Progress::KEY, "0").unwrap();
        assert_eq!(Progress::load_or_default(&store).current_level(), 1);

        store.write(Progress::KEY, "99").unwrap();
        assert_eq!(
            Progress::load_or_default(&store).current_level(),
            Progress::COMPLETED
        );

        store.write(Progress::KEY, "-3").unwrap();
        assert_eq!(Progress::load_or_default(&store).current_level(), 1);
    }
}
