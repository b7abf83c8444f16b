use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Seconds granted for every correct find in [`Mode::TimeChallenge`].
pub const TIME_BONUS_SECS: u32 = 3;

/// How long the presentation layer should keep a mistake highlighted.
pub const ERROR_FLASH_MILLIS: u32 = 600;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    ErrorBudgetExhausted,
    TimeExpired,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pending,
    Won,
    Lost(LossReason),
}

impl Outcome {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_finished(self) -> bool {
        !self.is_pending()
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::Pending
    }
}

/// Transient cue for the presentation layer (sounds, flashes, dialogs).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    CorrectFind,
    Mistake,
    Won,
    Lost(LossReason),
}

/// Outcome of clicking a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Found,
    Mistake,
    Won,
    Lost,
}

impl ClickOutcome {
    /// Whether this outcome could have caused an update to the session
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Cues to emit for this click. A click can only lose through a mistake and
    /// only win through a find, so each list is at most two long.
    pub fn signals(self) -> Vec<Signal> {
        use ClickOutcome::*;
        match self {
            NoChange => Vec::new(),
            Found => alloc::vec![Signal::CorrectFind],
            Mistake => alloc::vec![Signal::Mistake],
            Won => alloc::vec![Signal::CorrectFind, Signal::Won],
            Lost => alloc::vec![
                Signal::Mistake,
                Signal::Lost(LossReason::ErrorBudgetExhausted)
            ],
        }
    }
}

/// Outcome of a one second timer tick
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
    Expired,
}

impl TickOutcome {
    pub fn signals(self) -> Vec<Signal> {
        match self {
            Self::Expired => alloc::vec![Signal::Lost(LossReason::TimeExpired)],
            Self::NoChange | Self::Ticked => Vec::new(),
        }
    }
}

/// One attempt at a puzzle: tracks finds, mistakes and time until won or lost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    puzzle: Puzzle,
    mode: Mode,
    error_budget: CellCount,
    found: BTreeSet<CellPos>,
    error_count: CellCount,
    time_remaining: Option<u32>,
    elapsed_secs: u32,
    outcome: Outcome,
}

impl Session {
    pub fn new(puzzle: Puzzle, config: &GameConfig) -> Self {
        log::debug!(
            "new {} session: {} differences on {}x{}",
            config.mode,
            puzzle.difference_count(),
            puzzle.size(),
            puzzle.size()
        );
        Self {
            puzzle,
            mode: config.mode,
            error_budget: config.error_budget,
            found: BTreeSet::new(),
            error_count: 0,
            time_remaining: config.mode.is_timed().then_some(config.time_limit_secs),
            elapsed_secs: 0,
            outcome: Outcome::Pending,
        }
    }

    /// Starts over against a freshly generated puzzle.
    pub fn reset(&mut self, puzzle: Puzzle, config: &GameConfig) {
        *self = Self::new(puzzle, config);
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn found(&self) -> &BTreeSet<CellPos> {
        &self.found
    }

    pub fn is_found(&self, pos: CellPos) -> bool {
        self.found.contains(&pos)
    }

    pub fn found_count(&self) -> CellCount {
        self.found.len() as CellCount
    }

    pub fn differences_left(&self) -> CellCount {
        self.puzzle.difference_count() - self.found_count()
    }

    pub fn error_count(&self) -> CellCount {
        self.error_count
    }

    pub fn error_budget(&self) -> CellCount {
        self.error_budget
    }

    /// Mistakes still allowed, `None` when mistakes are never fatal.
    pub fn errors_left(&self) -> Option<CellCount> {
        self.has_error_limit()
            .then(|| self.error_budget.saturating_sub(self.error_count))
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn on_cell_click(&mut self, pos: CellPos) -> Result<ClickOutcome> {
        let pos = self.puzzle.validate_coords(pos)?;
        self.check_pending()?;

        if self.puzzle.looks_same(pos) {
            return Ok(self.record_mistake(pos));
        }

        if self.found.contains(&pos) || !self.puzzle.is_difference(pos) {
            log::trace!("click on {} ignored", pos);
            return Ok(ClickOutcome::NoChange);
        }

        self.found.insert(pos);
        if let Some(remaining) = self.time_remaining.as_mut() {
            *remaining = remaining.saturating_add(TIME_BONUS_SECS);
        }
        log::debug!(
            "found {} ({}/{})",
            pos,
            self.found.len(),
            self.puzzle.difference_count()
        );

        if self.found.len() == self.puzzle.differences().len() {
            self.end(Outcome::Won);
            Ok(ClickOutcome::Won)
        } else {
            Ok(ClickOutcome::Found)
        }
    }

    /// Advances the clock by one second. Terminal sessions ignore ticks.
    pub fn tick(&mut self) -> TickOutcome {
        if self.outcome.is_finished() {
            return TickOutcome::NoChange;
        }

        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        let Some(remaining) = self.time_remaining.as_mut() else {
            return TickOutcome::Ticked;
        };

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.end(Outcome::Lost(LossReason::TimeExpired));
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked
        }
    }

    fn record_mistake(&mut self, pos: CellPos) -> ClickOutcome {
        if !self.mode.counts_mistakes() {
            log::trace!("mistake at {} (not counted)", pos);
            return ClickOutcome::Mistake;
        }

        self.error_count = self.error_count.saturating_add(1);
        log::debug!("mistake at {}, {} so far", pos, self.error_count);

        if self.has_error_limit() && self.error_count >= self.error_budget {
            self.end(Outcome::Lost(LossReason::ErrorBudgetExhausted));
            ClickOutcome::Lost
        } else {
            ClickOutcome::Mistake
        }
    }

    fn has_error_limit(&self) -> bool {
        self.mode.counts_mistakes() && self.error_budget > 0
    }

    fn end(&mut self, outcome: Outcome) {
        if self.outcome.is_finished() {
            return;
        }
        log::debug!("session ended: {:?} after {}s", outcome, self.elapsed_secs);
        self.outcome = outcome;
    }

    fn check_pending(&self) -> Result<()> {
        if self.outcome.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
