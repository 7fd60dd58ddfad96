// controller.rs - One lock around the board and its run state
//
// `Simulation` is plain data: grid, cursor, paused flag, update period.
// `Controller` is a cheaply clonable handle that owns it behind a mutex.
// Every command takes the lock for its whole body, generation advance and
// file I/O included, so commands from the ticker and from input handling
// never interleave.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::codec;
use crate::config::{INTERVAL_STEP_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS, SimulationConfig};
use crate::cursor::{Cursor, Direction};
use crate::error::Result;
use crate::grid::Grid;
use crate::history::CycleDetector;
use crate::patterns::{self, Pattern};

/// Result of a command that is only effective in some run states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command changed the simulation.
    Applied,
    /// The command is legal but had no effect in the current run state.
    Ignored,
}

impl CommandOutcome {
    pub fn is_applied(self) -> bool {
        self == CommandOutcome::Applied
    }
}

/// Everything an input layer can ask of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveCursor(Direction),
    ToggleCell,
    PauseToggle,
    SetPaused(bool),
    SpeedUp,
    SlowDown,
    Save(PathBuf),
    Load(PathBuf),
    /// Advance one generation; `None` uses the configured worker count.
    Advance { workers: Option<usize> },
}

/// Board plus run state. Read through [`Controller::view`].
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    cursor: Cursor,
    paused: bool,
    interval_ms: u64,
    workers: usize,
    generation: u64,
    cycles: Option<CycleDetector>,
}

impl Simulation {
    fn new(config: &SimulationConfig) -> Result<Self> {
        let config = config.clone().validate()?;
        Ok(Self {
            grid: Grid::new(config.width, config.height)?,
            cursor: Cursor::default(),
            paused: true,
            interval_ms: config.interval_ms,
            workers: config.workers,
            generation: 0,
            cycles: config.stop_on_cycle.then(CycleDetector::new),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Cell under the cursor, wrapped onto the board.
    pub fn cursor_cell(&self) -> (usize, usize) {
        self.cursor.wrapped(self.grid.width(), self.grid.height())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Threads used when an advance names no count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Generations advanced since the board was last cleared, seeded or loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn advance(&mut self, workers: usize) -> CommandOutcome {
        if self.paused {
            return CommandOutcome::Ignored;
        }
        self.grid = self.grid.next_generation(workers);
        self.generation += 1;
        debug!(generation = self.generation, workers, population = self.grid.population(), "advanced");

        let repeated = self.cycles.as_mut().is_some_and(|cycles| cycles.observe(&self.grid));
        if repeated {
            self.paused = true;
            info!(generation = self.generation, "board repeats a recent generation, pausing");
        }
        CommandOutcome::Applied
    }

    fn toggle_cell_at_cursor(&mut self) -> CommandOutcome {
        if !self.paused {
            return CommandOutcome::Ignored;
        }
        let (x, y) = self.cursor_cell();
        match self.grid.toggle(x, y) {
            Ok(()) => CommandOutcome::Applied,
            Err(_) => CommandOutcome::Ignored,
        }
    }

    fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!(paused, "run state changed");
        }
        self.paused = paused;
    }

    fn speed_up(&mut self) -> u64 {
        self.interval_ms = self.interval_ms.saturating_sub(INTERVAL_STEP_MS).max(MIN_INTERVAL_MS);
        self.interval_ms
    }

    fn slow_down(&mut self) -> u64 {
        self.interval_ms = (self.interval_ms + INTERVAL_STEP_MS).min(MAX_INTERVAL_MS);
        self.interval_ms
    }

    fn save(&self, path: &Path) -> Result<CommandOutcome> {
        if !self.paused {
            return Ok(CommandOutcome::Ignored);
        }
        codec::save_to_file(&self.grid, path)?;
        info!(path = %path.display(), width = self.grid.width(), height = self.grid.height(), "grid saved");
        Ok(CommandOutcome::Applied)
    }

    fn load(&mut self, path: &Path) -> Result<CommandOutcome> {
        if !self.paused {
            return Ok(CommandOutcome::Ignored);
        }
        let grid = codec::load_from_file(path).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "load rejected, keeping current grid");
        })?;
        info!(path = %path.display(), width = grid.width(), height = grid.height(), "grid loaded");
        self.replace_grid(grid);
        Ok(CommandOutcome::Applied)
    }

    /// Install a new board and restart generation counting.
    fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
        if let Some(cycles) = self.cycles.as_mut() {
            cycles.clear();
        }
    }

    fn edit_while_paused(&mut self, edit: impl FnOnce(&mut Grid)) -> CommandOutcome {
        if !self.paused {
            return CommandOutcome::Ignored;
        }
        let mut grid = self.grid.clone();
        edit(&mut grid);
        self.replace_grid(grid);
        CommandOutcome::Applied
    }
}

/// Shared handle to a [`Simulation`]. Clones refer to the same board.
#[derive(Debug, Clone)]
pub struct Controller {
    inner: Arc<Mutex<Simulation>>,
}

impl Controller {
    /// A paused, all-dead board sized by `config`.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        Ok(Self { inner: Arc::new(Mutex::new(Simulation::new(config)?)) })
    }

    // A panicking worker leaves the simulation state consistent (the old grid
    // is only replaced after a finished generation), so a poisoned lock is reused.
    fn lock(&self) -> MutexGuard<'_, Simulation> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the current state while holding the lock. Renderers use
    /// this to draw a consistent frame.
    pub fn view<R>(&self, f: impl FnOnce(&Simulation) -> R) -> R {
        f(&self.lock())
    }

    pub fn is_paused(&self) -> bool {
        self.lock().is_paused()
    }

    pub fn interval(&self) -> Duration {
        self.lock().interval()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    pub fn cursor_position(&self) -> (i64, i64) {
        self.lock().cursor().position()
    }

    /// Copy of the current board.
    pub fn grid(&self) -> Grid {
        self.lock().grid().clone()
    }

    /// Advance one generation with the configured worker count. No-op while paused.
    pub fn advance(&self) -> CommandOutcome {
        let mut sim = self.lock();
        let workers = sim.workers();
        sim.advance(workers)
    }

    /// Advance one generation with `workers` threads. No-op while paused.
    pub fn advance_with(&self, workers: usize) -> CommandOutcome {
        self.lock().advance(workers)
    }

    pub fn move_cursor(&self, direction: Direction) {
        self.lock().cursor.move_to(direction);
    }

    /// Flip the cell under the cursor. Only while paused.
    pub fn toggle_cell_at_cursor(&self) -> CommandOutcome {
        self.lock().toggle_cell_at_cursor()
    }

    /// Put the cursor on `(x, y)` and flip that cell. Only while paused.
    pub fn toggle_cell_at(&self, x: usize, y: usize) -> CommandOutcome {
        let mut sim = self.lock();
        if !sim.paused {
            return CommandOutcome::Ignored;
        }
        let (Ok(cx), Ok(cy)) = (i64::try_from(x), i64::try_from(y)) else {
            return CommandOutcome::Ignored;
        };
        sim.cursor.set_position(cx, cy);
        sim.toggle_cell_at_cursor()
    }

    /// Flip between paused and running. Returns the new paused flag.
    pub fn pause_toggle(&self) -> bool {
        let mut sim = self.lock();
        let paused = !sim.paused;
        sim.set_paused(paused);
        paused
    }

    pub fn set_paused(&self, paused: bool) {
        self.lock().set_paused(paused);
    }

    /// Shorten the update period by one step. Returns the new period in ms.
    pub fn speed_up(&self) -> u64 {
        self.lock().speed_up()
    }

    /// Lengthen the update period by one step. Returns the new period in ms.
    pub fn slow_down(&self) -> u64 {
        self.lock().slow_down()
    }

    /// Write the board to `path`. Ignored while running.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<CommandOutcome> {
        self.lock().save(path.as_ref())
    }

    /// Replace the board with the one stored at `path`. Ignored while running.
    ///
    /// On a missing or malformed file the current board is left untouched and
    /// the error is returned.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<CommandOutcome> {
        self.lock().load(path.as_ref())
    }

    /// Kill every cell. Only while paused.
    pub fn clear(&self) -> CommandOutcome {
        self.lock().edit_while_paused(Grid::clear)
    }

    /// Clear the board and stamp `pattern` in its middle. Only while paused.
    pub fn apply_pattern(&self, pattern: &Pattern) -> CommandOutcome {
        self.lock().edit_while_paused(|grid| patterns::apply_pattern(grid, pattern))
    }

    /// Fill about a third of the board at random. Only while paused.
    pub fn randomize(&self, seed: u64) -> CommandOutcome {
        self.lock().edit_while_paused(|grid| patterns::apply_random_pattern(grid, seed))
    }

    /// Dispatch a [`Command`] from an input layer.
    pub fn execute(&self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::MoveCursor(direction) => {
                self.move_cursor(direction);
                Ok(CommandOutcome::Applied)
            }
            Command::ToggleCell => Ok(self.toggle_cell_at_cursor()),
            Command::PauseToggle => {
                self.pause_toggle();
                Ok(CommandOutcome::Applied)
            }
            Command::SetPaused(paused) => {
                self.set_paused(paused);
                Ok(CommandOutcome::Applied)
            }
            Command::SpeedUp => {
                self.speed_up();
                Ok(CommandOutcome::Applied)
            }
            Command::SlowDown => {
                self.slow_down();
                Ok(CommandOutcome::Applied)
            }
            Command::Save(path) => self.save(path),
            Command::Load(path) => self.load(path),
            Command::Advance { workers: Some(workers) } => Ok(self.advance_with(workers)),
            Command::Advance { workers: None } => Ok(self.advance()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Controller {
        let config = SimulationConfig { width: 5, height: 4, workers: 2, ..Default::default() };
        Controller::new(&config).unwrap()
    }

    #[test]
    fn starts_paused_and_empty() {
        let controller = small();
        assert!(controller.is_paused());
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.interval(), Duration::from_millis(100));
        assert_eq!(controller.grid().population(), 0);
    }

    #[test]
    fn configured_workers_drive_default_advance() {
        let config = SimulationConfig { width: 5, height: 4, workers: 0, ..Default::default() };
        let controller = Controller::new(&config).unwrap();
        assert_eq!(controller.view(Simulation::workers), 1);
        assert_eq!(small().view(Simulation::workers), 2);

        controller.toggle_cell_at(1, 1);
        controller.set_paused(false);
        assert_eq!(controller.execute(Command::Advance { workers: None }).unwrap(), CommandOutcome::Applied);
        assert_eq!(controller.grid().population(), 0);
    }

    #[test]
    fn pause_state_machine() {
        let controller = small();
        assert!(!controller.pause_toggle());
        assert!(controller.pause_toggle());
        controller.set_paused(false);
        controller.set_paused(false);
        assert!(!controller.is_paused());
    }

    #[test]
    fn advance_is_noop_while_paused() {
        let controller = small();
        controller.toggle_cell_at(1, 1);
        assert_eq!(controller.advance(), CommandOutcome::Ignored);
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.grid().population(), 1);

        controller.set_paused(false);
        assert_eq!(controller.advance_with(3), CommandOutcome::Applied);
        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.grid().population(), 0);
    }

    #[test]
    fn toggle_only_while_paused() {
        let controller = small();
        assert!(controller.toggle_cell_at_cursor().is_applied());
        assert!(controller.grid().is_alive(0, 0));

        controller.set_paused(false);
        assert_eq!(controller.toggle_cell_at_cursor(), CommandOutcome::Ignored);
        assert_eq!(controller.toggle_cell_at(2, 2), CommandOutcome::Ignored);
        assert!(controller.grid().is_alive(0, 0));
    }

    #[test]
    fn toggle_wraps_cursor_outside_grid() {
        let controller = small();
        controller.move_cursor(Direction::Up);
        controller.move_cursor(Direction::Left);
        assert_eq!(controller.cursor_position(), (-1, -1));
        assert!(controller.toggle_cell_at_cursor().is_applied());
        assert!(controller.grid().is_alive(4, 3));
    }

    #[test]
    fn toggle_at_moves_cursor() {
        let controller = small();
        controller.toggle_cell_at(3, 2);
        assert_eq!(controller.cursor_position(), (3, 2));
        controller.toggle_cell_at_cursor();
        assert_eq!(controller.grid().population(), 0);
    }

    #[test]
    fn speed_is_clamped() {
        let controller = small();
        assert_eq!(controller.speed_up(), 90);
        for _ in 0..20 {
            controller.speed_up();
        }
        assert_eq!(controller.speed_up(), MIN_INTERVAL_MS);
        for _ in 0..200 {
            controller.slow_down();
        }
        assert_eq!(controller.slow_down(), MAX_INTERVAL_MS);
    }

    #[test]
    fn stop_on_cycle_pauses_still_life() {
        let config = SimulationConfig {
            width: 6,
            height: 6,
            workers: 1,
            stop_on_cycle: true,
            ..Default::default()
        };
        let controller = Controller::new(&config).unwrap();
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            controller.toggle_cell_at(x, y);
        }
        controller.set_paused(false);
        controller.advance();
        assert!(!controller.is_paused());
        controller.advance();
        assert!(controller.is_paused());
        assert_eq!(controller.generation(), 2);
    }

    #[test]
    fn board_edits_reset_generation() {
        let controller = small();
        controller.toggle_cell_at(0, 0);
        controller.set_paused(false);
        controller.advance();
        assert_eq!(controller.clear(), CommandOutcome::Ignored);
        controller.set_paused(true);

        assert!(controller.randomize(3).is_applied());
        assert_eq!(controller.generation(), 0);
        let glider = patterns::find_pattern("Glider").unwrap();
        assert!(controller.apply_pattern(glider).is_applied());
        assert_eq!(controller.grid().population(), 5);
        assert!(controller.clear().is_applied());
        assert_eq!(controller.grid().population(), 0);
    }

    #[test]
    fn execute_dispatches() {
        let controller = small();
        controller.execute(Command::MoveCursor(Direction::Right)).unwrap();
        controller.execute(Command::MoveCursor(Direction::Down)).unwrap();
        assert!(controller.execute(Command::ToggleCell).unwrap().is_applied());
        assert!(controller.grid().is_alive(1, 1));

        controller.execute(Command::SlowDown).unwrap();
        controller.execute(Command::SlowDown).unwrap();
        controller.execute(Command::SpeedUp).unwrap();
        assert_eq!(controller.interval(), Duration::from_millis(110));

        controller.execute(Command::PauseToggle).unwrap();
        assert!(!controller.is_paused());
        let outcome = controller.execute(Command::Advance { workers: Some(0) }).unwrap();
        assert!(outcome.is_applied());
        controller.execute(Command::SetPaused(true)).unwrap();
        let outcome = controller.execute(Command::Advance { workers: None }).unwrap();
        assert_eq!(outcome, CommandOutcome::Ignored);
        assert_eq!(controller.generation(), 1);
    }

    #[test]
    fn view_sees_consistent_state() {
        let controller = small();
        controller.move_cursor(Direction::Left);
        let (cell, paused, dims) = controller.view(|sim| {
            (sim.cursor_cell(), sim.is_paused(), (sim.grid().width(), sim.grid().height()))
        });
        assert_eq!(cell, (4, 0));
        assert!(paused);
        assert_eq!(dims, (5, 4));
    }
}
