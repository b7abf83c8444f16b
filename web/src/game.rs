use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use serde::Serialize;
use spotter_core::{
    Alphabet, CellCount, CellPos, ClickOutcome, Coord, ERROR_FLASH_MILLIS, FIRST_LEVEL,
    FreePlaySettings, GameConfig, LAST_LEVEL, Level, LevelStatus, MapPoint, Outcome, Persist,
    Progress, SIZE_CHOICES, Session, Symbol, SymbolSet, TickOutcome, map_position, mode_for,
    section_for, validate_level,
};
use wasm_bindgen::prelude::*;

use crate::storage::LocalStore;
use crate::utils;

const TICK_MILLIS: u32 = 1_000;

/// Journey level being played, with the progress it was unlocked from.
#[derive(Debug)]
struct Attempt {
    level: Level,
    progress: Progress,
}

/// Everything about the puzzle currently on screen.
#[derive(Debug)]
struct Board {
    session: Session,
    config: GameConfig,
    alphabet: Alphabet,
    attempt: Option<Attempt>,
    flashing: BTreeSet<CellPos>,
}

impl Board {
    fn new(config: GameConfig, alphabet: Alphabet, attempt: Option<Attempt>) -> spotter_core::Result<Self> {
        let puzzle = config.generate(&alphabet, utils::next_seed())?;
        Ok(Self {
            session: Session::new(puzzle, &config),
            config,
            alphabet,
            attempt,
            flashing: BTreeSet::new(),
        })
    }

    fn level(&self) -> Option<Level> {
        self.attempt.as_ref().map(|attempt| attempt.level)
    }

    fn restart(&mut self) -> spotter_core::Result<()> {
        let puzzle = self.config.generate(&self.alphabet, utils::next_seed())?;
        self.session.reset(puzzle, &self.config);
        self.flashing.clear();
        Ok(())
    }

    fn click(&mut self, pos: CellPos) -> spotter_core::Result<ClickOutcome> {
        let outcome = self.session.on_cell_click(pos)?;
        match outcome {
            ClickOutcome::Mistake | ClickOutcome::Lost => {
                self.flashing.insert(pos);
            }
            ClickOutcome::Won => {
                if let Some(Attempt { level, progress }) = &mut self.attempt {
                    progress.complete_and_save(*level, &mut LocalStore);
                }
            }
            ClickOutcome::NoChange | ClickOutcome::Found => {}
        }
        Ok(outcome)
    }
}

/// What the rendering layer needs to draw the current state.
#[derive(Debug, Serialize)]
struct Snapshot {
    size: Coord,
    base: Vec<Vec<Symbol>>,
    modified: Vec<Vec<Symbol>>,
    found: Vec<CellPos>,
    flashing: Vec<CellPos>,
    difference_count: CellCount,
    found_count: CellCount,
    error_count: CellCount,
    errors_left: Option<CellCount>,
    time_remaining: Option<u32>,
    elapsed_secs: u32,
    mode: &'static str,
    outcome: Outcome,
    level: Option<Level>,
}

impl Snapshot {
    fn of(board: &Board) -> Self {
        let session = &board.session;
        let puzzle = session.puzzle();
        Self {
            size: puzzle.size(),
            base: puzzle.base().rows().map(Iterator::collect).collect(),
            modified: puzzle.modified().rows().map(Iterator::collect).collect(),
            found: session.found().iter().copied().collect(),
            flashing: board.flashing.iter().copied().collect(),
            difference_count: puzzle.difference_count(),
            found_count: session.found_count(),
            error_count: session.error_count(),
            errors_left: session.errors_left(),
            time_remaining: session.time_remaining(),
            elapsed_secs: session.elapsed_secs(),
            mode: session.mode().name(),
            outcome: session.outcome(),
            level: board.level(),
        }
    }
}

struct Shared {
    board: RefCell<Board>,
    ticker: RefCell<Option<Interval>>,
    on_change: RefCell<Option<js_sys::Function>>,
}

impl Shared {
    fn notify(&self) {
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                log::warn!("change callback failed: {:?}", err);
            }
        }
    }

    fn on_tick(self: &Rc<Self>) {
        let outcome = self.board.borrow_mut().session.tick();
        match outcome {
            TickOutcome::NoChange => return,
            TickOutcome::Ticked => {}
            TickOutcome::Expired => {
                log::debug!("time expired");
                // still inside the interval callback, so stop it from the next turn
                let shared = Rc::downgrade(self);
                Timeout::new(0, move || {
                    if let Some(shared) = shared.upgrade() {
                        shared.ticker.borrow_mut().take();
                    }
                })
                .forget();
            }
        }
        self.notify();
    }
}

/// One puzzle attempt driven from the page: clicks come in from JS, timer ticks
/// and flash expiry are scheduled here and reported through the change callback.
#[wasm_bindgen]
pub struct WebGame {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WebGame {
    /// Free play using the saved settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGame, JsError> {
        let settings = FreePlaySettings::load(&LocalStore);
        let alphabet = settings.symbols.build()?;
        Self::start(Board::new(settings.game_config(), alphabet, None)?)
    }

    /// A journey level, provided it has been unlocked.
    pub fn journey(level: Level) -> Result<WebGame, JsError> {
        let progress = Progress::load_or_default(&LocalStore);
        let config = progress.start(level)?;
        log::debug!("starting level {}: {:?}", level, config);
        let attempt = Attempt { level, progress };
        Self::start(Board::new(config, SymbolSet::ALL.build()?, Some(attempt))?)
    }

    /// Called without arguments after every change not caused by [`WebGame::click`].
    pub fn set_on_change(&self, callback: js_sys::Function) {
        self.shared.on_change.replace(Some(callback));
    }

    /// Handles a click on the modified grid, returning the signals as a JSON array.
    pub fn click(&self, row: Coord, col: Coord) -> Result<String, JsError> {
        let pos = CellPos::new(row, col);
        let (outcome, finished) = {
            let mut board = self.shared.board.borrow_mut();
            let outcome = board.click(pos)?;
            (outcome, board.session.is_finished())
        };

        if matches!(outcome, ClickOutcome::Mistake | ClickOutcome::Lost) {
            self.clear_flash_later(pos);
        }
        if finished {
            self.stop_ticker();
        }
        Ok(serde_json::to_string(&outcome.signals())?)
    }

    /// New puzzle with the same configuration.
    pub fn restart(&self) -> Result<(), JsError> {
        self.stop_ticker();
        self.shared.board.borrow_mut().restart()?;
        self.start_ticker();
        Ok(())
    }

    pub fn snapshot(&self) -> Result<String, JsError> {
        let board = self.shared.board.borrow();
        Ok(serde_json::to_string(&Snapshot::of(&board))?)
    }

    /// Whether the one second timer is still scheduled.
    pub fn is_ticking(&self) -> bool {
        self.shared.ticker.borrow().is_some()
    }
}

impl WebGame {
    /// An attempt outside the journey with an explicit configuration.
    pub fn with_config(config: GameConfig, alphabet: Alphabet) -> Result<WebGame, JsError> {
        Self::start(Board::new(config, alphabet, None)?)
    }

    fn start(board: Board) -> Result<WebGame, JsError> {
        let game = WebGame {
            shared: Rc::new(Shared {
                board: RefCell::new(board),
                ticker: RefCell::new(None),
                on_change: RefCell::new(None),
            }),
        };
        game.start_ticker();
        Ok(game)
    }

    fn start_ticker(&self) {
        let shared = Rc::downgrade(&self.shared);
        let interval = Interval::new(TICK_MILLIS, move || {
            if let Some(shared) = shared.upgrade() {
                shared.on_tick();
            }
        });
        self.shared.ticker.replace(Some(interval));
    }

    fn stop_ticker(&self) {
        if self.shared.ticker.borrow_mut().take().is_some() {
            log::trace!("ticker stopped");
        }
    }

    fn clear_flash_later(&self, pos: CellPos) {
        let shared = Rc::downgrade(&self.shared);
        Timeout::new(ERROR_FLASH_MILLIS, move || {
            if let Some(shared) = shared.upgrade() {
                shared.board.borrow_mut().flashing.remove(&pos);
                shared.notify();
            }
        })
        .forget();
    }
}

/// Journey map entry for a single level.
#[derive(Debug, Serialize)]
struct MapEntry {
    level: Level,
    section: u8,
    mode: &'static str,
    position: MapPoint,
    status: LevelStatus,
}

fn journey_map_of(progress: &Progress) -> spotter_core::Result<Vec<MapEntry>> {
    (FIRST_LEVEL..=LAST_LEVEL)
        .map(|level| {
            Ok(MapEntry {
                level,
                section: section_for(level)?.index,
                mode: mode_for(level)?.name(),
                position: map_position(level)?,
                status: progress.status(level),
            })
        })
        .collect()
}

/// Highest unlocked journey level, 41 once every level is done.
#[wasm_bindgen]
pub fn current_level() -> Level {
    Progress::load_or_default(&LocalStore).current_level()
}

/// Lock status of one journey level: `"Completed"`, `"Available"` or `"Locked"`.
#[wasm_bindgen]
pub fn level_status(level: Level) -> Result<String, JsError> {
    let progress = Progress::load_or_default(&LocalStore);
    Ok(serde_json::to_string(&level_status_of(&progress, level)?)?)
}

fn level_status_of(progress: &Progress, level: Level) -> spotter_core::Result<LevelStatus> {
    Ok(progress.status(validate_level(level)?))
}

/// Every journey level with its map position and lock status, as JSON.
#[wasm_bindgen]
pub fn journey_map() -> Result<String, JsError> {
    let progress = Progress::load_or_default(&LocalStore);
    Ok(serde_json::to_string(&journey_map_of(&progress)?)?)
}

/// Saved free play settings, the offered sizes and the slider ceiling for the
/// saved size, as JSON.
#[wasm_bindgen]
pub fn settings() -> Result<String, JsError> {
    #[derive(Serialize)]
    struct View {
        size: Coord,
        size_choices: &'static [Coord],
        differences: CellCount,
        max_differences: CellCount,
        symbols: SymbolSet,
    }

    let settings = FreePlaySettings::load(&LocalStore);
    Ok(serde_json::to_string(&View {
        size: settings.size(),
        size_choices: &SIZE_CHOICES,
        differences: settings.differences(),
        max_differences: FreePlaySettings::max_differences(settings.size()),
        symbols: settings.symbols,
    })?)
}

#[wasm_bindgen]
pub fn save_settings(
    size: Coord,
    differences: CellCount,
    letters: bool,
    digits: bool,
    pictograms: bool,
) -> Result<(), JsError> {
    let mut store = LocalStore;
    let mut settings = FreePlaySettings::load(&store);
    let symbols = SymbolSet::new(letters, digits, pictograms);
    symbols.build()?;

    if size != settings.size() {
        settings.set_size(size)?;
    }
    settings.set_differences(differences);
    settings.symbols = symbols;
    settings.save(&mut store);
    Ok(())
}
