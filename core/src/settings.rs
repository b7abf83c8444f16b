use serde::{Deserialize, Serialize};

use crate::*;

/// Grid sizes offered for free play.
pub const SIZE_CHOICES: [Coord; 5] = [3, 4, 5, 6, 8];

/// Player-chosen setup for free play, outside of the journey.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreePlaySettings {
    size: Coord,
    differences: CellCount,
    pub symbols: SymbolSet,
}

impl FreePlaySettings {
    pub const DEFAULT_SIZE: Coord = 4;
    pub const DEFAULT_DIFFERENCES: CellCount = 3;

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn differences(&self) -> CellCount {
        self.differences
    }

    /// Slider ceiling: at most half of the cells may differ.
    pub const fn max_differences(size: Coord) -> CellCount {
        mult(size, size) / 2
    }

    pub fn is_size_choice(size: Coord) -> bool {
        SIZE_CHOICES.contains(&size)
    }

    /// Picks a new grid size and resets the difference count to its default.
    pub fn set_size(&mut self, size: Coord) -> Result<()> {
        if !Self::is_size_choice(size) {
            return Err(GameError::InvalidSize);
        }
        self.size = size;
        self.differences = Self::DEFAULT_DIFFERENCES.clamp(1, Self::max_differences(size));
        Ok(())
    }

    /// Sets the difference count, clamped into the slider range.
    pub fn set_differences(&mut self, differences: CellCount) {
        self.differences = differences.clamp(1, Self::max_differences(self.size).max(1));
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size,
            differences: self.differences,
            error_budget: 0,
            mode: Mode::Zen,
            time_limit_secs: GameConfig::DEFAULT_TIME_LIMIT_SECS,
        }
    }

    /// Brings values read from storage back into range.
    fn sanitized(mut self) -> Self {
        if !Self::is_size_choice(self.size) {
            log::warn!("stored size {} is not offered, using default", self.size);
            self.size = Self::DEFAULT_SIZE;
        }
        if self.symbols.is_empty() {
            log::warn!("stored settings disable every symbol group, enabling all");
            self.symbols = SymbolSet::ALL;
        }
        self.set_differences(self.differences);
        self
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self::load_or_default(store).sanitized()
    }
}

impl Default for FreePlaySettings {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            differences: Self::DEFAULT_DIFFERENCES,
            symbols: SymbolSet::ALL,
        }
    }
}

impl StorageKey for FreePlaySettings {
    const KEY: &'static str = "spotter:settings:v1";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_visit() {
        let settings = FreePlaySettings::load(&MemoryStore::new());
        assert_eq!(settings.size(), 4);
        assert_eq!(settings.differences(), 3);
        assert_eq!(settings.symbols, SymbolSet::ALL);
        assert_eq!(settings.game_config().mode, Mode::Zen);
    }

    #[test]
    fn changing_size_resets_differences() {
        let mut settings = FreePlaySettings::default();
        settings.set_differences(8);
        assert_eq!(settings.differences(), 8);

        settings.set_size(8).unwrap();
        assert_eq!(settings.differences(), 3);
        assert_eq!(settings.set_size(1), Err(GameError::InvalidSize));
        assert_eq!(settings.size(), 8);
    }

    #[test]
    fn only_offered_sizes_are_accepted() {
        let mut settings = FreePlaySettings::default();
        for size in [0, 2, 7, 9, 255] {
            assert_eq!(settings.set_size(size), Err(GameError::InvalidSize), "size {size}");
        }
        assert_eq!(settings.size(), FreePlaySettings::DEFAULT_SIZE);

        for size in SIZE_CHOICES {
            settings.set_size(size).unwrap();
            assert_eq!(settings.size(), size);
        }
    }

    #[test]
    fn stored_size_outside_choices_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store
            .write(FreePlaySettings::KEY, r#"{"size":7,"differences":3}"#)
            .unwrap();

        let settings = FreePlaySettings::load(&store);
        assert_eq!(settings.size(), FreePlaySettings::DEFAULT_SIZE);
        assert_eq!(settings.differences(), 3);
        assert_eq!(settings.symbols, SymbolSet::ALL);
    }

    #[test]
    fn difference_slider_is_capped_at_half_the_cells() {
        assert_eq!(FreePlaySettings::max_differences(3), 4);
        assert_eq!(FreePlaySettings::max_differences(8), 32);

        let mut settings = FreePlaySettings::default();
        settings.set_differences(100);
        assert_eq!(settings.differences(), 8);
        settings.set_differences(0);
        assert_eq!(settings.differences(), 1);
    }

    #[test]
    fn saved_settings_survive_reload() {
        let mut store = MemoryStore::new();
        let mut settings = FreePlaySettings::default();
        settings.set_size(6).unwrap();
        settings.set_differences(10);
        settings.symbols = SymbolSet::new(false, true, true);
        settings.save(&mut store);

        assert_eq!(FreePlaySettings::load(&store), settings);
    }

    #[test]
    fn corrupt_stored_settings_are_repaired() {
        let mut store = MemoryStore::new();
        store
            .write(
                FreePlaySettings::KEY,
                r#"{"size":3,"differences":9,"symbols":{"letters":false,"digits":false,"pictograms":false}}"#,
            )
            .unwrap();

        let settings = FreePlaySettings::load(&store);
        assert_eq!(settings.size(), 3);
        assert_eq!(settings.differences(), 4);
        assert_eq!(settings.symbols, SymbolSet::ALL);
    }

    #[test]
    fn free_play_config_generates() {
        let settings = FreePlaySettings::default();
        let alphabet = settings.symbols.build().unwrap();
        let puzzle = settings.game_config().generate(&alphabet, 1).unwrap();
        assert_eq!(puzzle.size(), 4);
        assert_eq!(puzzle.difference_count(), 3);
    }
}
