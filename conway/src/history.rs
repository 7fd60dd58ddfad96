// history.rs - Detects a board that has settled into a short cycle

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Grid;

/// Number of recent generations remembered.
pub const HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    recent: VecDeque<u64>,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self { recent: VecDeque::with_capacity(HISTORY_LEN) }
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }

    /// Record `grid` and report whether it matches one of the last
    /// [`HISTORY_LEN`] boards seen. Still lifes and oscillators with a period
    /// up to that length are caught.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        let hash = hash_grid(grid);
        if self.recent.contains(&hash) {
            return true;
        }
        if self.recent.len() == HISTORY_LEN {
            self.recent.pop_front();
        }
        self.recent.push_back(hash);
        false
    }
}

fn hash_grid(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.hash(&mut hasher);
    hasher.finish()
}
