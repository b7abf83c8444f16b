use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use crate::*;

/// 1-based journey level.
pub type Level = u8;

pub const FIRST_LEVEL: Level = 1;
pub const LAST_LEVEL: Level = 40;
pub const LEVELS_PER_SECTION: Level = 10;
pub const SECTION_COUNT: u8 = LAST_LEVEL / LEVELS_PER_SECTION;

const ZEN_LEVELS: RangeInclusive<Level> = 1..=10;
const NORMAL_LEVELS: RangeInclusive<Level> = 11..=25;

/// Mistake budget handed to Zen levels, never enforced.
const ZEN_ERROR_BUDGET: CellCount = 10;

pub fn validate_level(level: Level) -> Result<Level> {
    if (FIRST_LEVEL..=LAST_LEVEL).contains(&level) {
        Ok(level)
    } else {
        Err(GameError::OutOfRangeLevel)
    }
}

pub fn mode_for(level: Level) -> Result<Mode> {
    let level = validate_level(level)?;
    Ok(if ZEN_LEVELS.contains(&level) {
        Mode::Zen
    } else if NORMAL_LEVELS.contains(&level) {
        Mode::Normal
    } else {
        Mode::TimeChallenge
    })
}

/// Puzzle and rule parameters for a journey level.
pub fn parameters_for(level: Level) -> Result<GameConfig> {
    Ok(match mode_for(level)? {
        Mode::Zen => {
            // one step every two levels: 3x3 with 7 differences up to 7x7 with 3
            let step = (level - 1) / 2;
            GameConfig {
                size: 3 + step,
                differences: CellCount::from(7 - step),
                error_budget: ZEN_ERROR_BUDGET,
                mode: Mode::Zen,
                time_limit_secs: GameConfig::DEFAULT_TIME_LIMIT_SECS,
            }
        }
        Mode::Normal => {
            let step = ((level - 11) / 2).min(4);
            GameConfig {
                size: 4 + step,
                differences: 5,
                error_budget: CellCount::from(5 - step),
                mode: Mode::Normal,
                time_limit_secs: GameConfig::DEFAULT_TIME_LIMIT_SECS,
            }
        }
        Mode::TimeChallenge => {
            let (size, time_limit_secs) = match level {
                ..=27 => (4, 120),
                28..=29 => (5, 100),
                30..=31 => (6, 80),
                32..=33 => (7, 60),
                34..=35 => (8, 40),
                36..=37 => (8, 25),
                _ => (8, 20u32.saturating_sub(u32::from(level - 37) * 5).max(5)),
            };
            GameConfig {
                size,
                differences: 3,
                error_budget: CellCount::from(5u8.saturating_sub((level - 25) / 3).max(1)),
                mode: Mode::TimeChallenge,
                time_limit_secs,
            }
        }
    })
}

/// A group of consecutive levels shown together on the journey map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// 0-based section number
    pub index: u8,
    pub first: Level,
    pub last: Level,
}

impl Section {
    pub fn levels(&self) -> RangeInclusive<Level> {
        self.first..=self.last
    }

    pub fn contains(&self, level: Level) -> bool {
        self.levels().contains(&level)
    }

    const fn nth(index: u8) -> Self {
        Self {
            index,
            first: index * LEVELS_PER_SECTION + 1,
            last: (index + 1) * LEVELS_PER_SECTION,
        }
    }
}

pub fn section_for(level: Level) -> Result<Section> {
    let level = validate_level(level)?;
    Ok(Section::nth((level - 1) / LEVELS_PER_SECTION))
}

pub fn sections() -> impl Iterator<Item = Section> {
    (0..SECTION_COUNT).map(Section::nth)
}

/// Node placement on the journey map, as fractions of the map width and height.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

const MAP_WIDTH: f32 = 730.0;
const MAP_HEIGHT: f32 = 1010.0;

// pixel centers on the 730x1010 map artwork, level 1 first
const MAP_NODES: [(u16, u16); LAST_LEVEL as usize] = [
    (393, 905),
    (520, 868),
    (538, 813),
    (463, 792),
    (400, 790),
    (343, 786),
    (297, 745),
    (246, 743),
    (312, 701),
    (375, 701),
    (453, 693),
    (510, 690),
    (499, 651),
    (426, 634),
    (368, 638),
    (300, 632),
    (243, 597),
    (295, 566),
    (353, 542),
    (399, 538),
    (450, 534),
    (497, 476),
    (443, 445),
    (380, 448),
    (310, 441),
    (266, 403),
    (314, 365),
    (374, 362),
    (437, 348),
    (490, 321),
    (531, 277),
    (439, 243),
    (386, 233),
    (341, 231),
    (291, 224),
    (246, 195),
    (297, 138),
    (358, 158),
    (421, 125),
    (393, 78),
];

pub fn map_position(level: Level) -> Result<MapPoint> {
    let level = validate_level(level)?;
    let (x, y) = MAP_NODES[usize::from(level - 1)];
    Ok(MapPoint {
        x: f32::from(x) / MAP_WIDTH,
        y: f32::from(y) / MAP_HEIGHT,
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    Completed,
    Available,
    Locked,
}

impl LevelStatus {
    pub const fn of(level: Level, current_level: Level) -> Self {
        if level < current_level {
            Self::Completed
        } else if level == current_level {
            Self::Available
        } else {
            Self::Locked
        }
    }

    pub const fn is_playable(self) -> bool {
        !matches!(self, Self::Locked)
    }
}
