// config.rs - Simulation settings
// Defaults match the classic console board: 50 columns by 25 rows, one
// generation every 100 ms, and one worker per available CPU.

use std::num::NonZeroUsize;

use crate::error::{LifeError, Result};

/// Fastest update period, in milliseconds.
pub const MIN_INTERVAL_MS: u64 = 10;
/// Slowest update period, in milliseconds.
pub const MAX_INTERVAL_MS: u64 = 1000;
/// Amount a single speed-up or slow-down changes the period by.
pub const INTERVAL_STEP_MS: u64 = 10;
/// Update period a new simulation starts with.
pub const DEFAULT_INTERVAL_MS: u64 = 100;

pub const DEFAULT_WIDTH: usize = 50;
pub const DEFAULT_HEIGHT: usize = 25;

/// Everything needed to start a [`Controller`](crate::Controller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Grid columns.
    pub width: usize,
    /// Grid rows.
    pub height: usize,
    /// Worker threads used per generation when the caller gives no count.
    pub workers: usize,
    /// Delay between generations while running.
    pub interval_ms: u64,
    /// Pause automatically once the board repeats a recent generation.
    pub stop_on_cycle: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            workers: default_workers(),
            interval_ms: DEFAULT_INTERVAL_MS,
            stop_on_cycle: false,
        }
    }
}

impl SimulationConfig {
    /// Reject an empty board and bring the other fields into range.
    pub fn validate(mut self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::ZeroDimension { width: self.width, height: self.height });
        }
        self.workers = self.workers.max(1);
        self.interval_ms = snap_interval(self.interval_ms);
        Ok(self)
    }
}

/// One worker per available CPU, at least one.
pub fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

pub fn clamp_interval(interval_ms: u64) -> u64 {
    interval_ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)
}

/// Round to the nearest multiple of [`INTERVAL_STEP_MS`], then clamp. Speed
/// changes move in whole steps, so a snapped period reaches both bounds exactly.
pub fn snap_interval(interval_ms: u64) -> u64 {
    let half = INTERVAL_STEP_MS / 2;
    clamp_interval(interval_ms.saturating_add(half) / INTERVAL_STEP_MS * INTERVAL_STEP_MS)
}
