// grid.rs - Toroidal cell matrix and parallel generation advance
//
// Cells live in one flat row-major buffer, index = row * width + col.
// Every cell has eight neighbors: coordinates wrap around both edges.

use std::ops::Range;

use tracing::trace;

use crate::cell::Cell;
use crate::error::{LifeError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid. Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self { width, height, cells: vec![Cell::DEAD; len] })
    }

    /// Grid over an existing row-major cell buffer.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if cells.len() != expected {
            return Err(LifeError::CellCountMismatch { expected, found: cells.len() });
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows top to bottom, each `width` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// `false` for coordinates outside the grid.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Cell::is_alive)
    }

    fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell> {
        let (width, height) = (self.width, self.height);
        if x < width && y < height {
            Ok(&mut self.cells[y * width + x])
        } else {
            Err(LifeError::OutOfBounds { x, y, width, height })
        }
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        self.get_mut(x, y)?.set_life_state(alive);
        Ok(())
    }

    /// Set the cell at `(x, y)` taken modulo the board size.
    pub(crate) fn set_wrapped(&mut self, x: usize, y: usize, alive: bool) {
        let index = (y % self.height) * self.width + x % self.width;
        self.cells[index].set_life_state(alive);
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> Result<()> {
        self.get_mut(x, y)?.invert_life();
        Ok(())
    }

    /// Number of live cells on the whole grid.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Kill every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::DEAD);
    }

    /// Discard every cell and start over with an all-dead `width` x `height` matrix.
    pub fn reset(&mut self, width: usize, height: usize) -> Result<()> {
        *self = Grid::new(width, height)?;
        Ok(())
    }

    /// Live cells among the eight toroidal neighbors of `(x, y)`.
    ///
    /// Coordinates past the edge wrap around first, so `(x + width, y)` counts
    /// the same block as `(x, y)`. A neighbor position that wraps back onto the
    /// cell itself (only possible when a dimension is 1) is not counted.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.width, self.height);
        let (x, y) = (x % w, y % h);

        let mut count = 0;
        for ny in [(y + h - 1) % h, y, (y + 1) % h] {
            for nx in [(x + w - 1) % w, x, (x + 1) % w] {
                if (nx, ny) != (x, y) && self.cells[ny * w + nx].is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Compute the next generation into a fresh grid, leaving `self` untouched.
    ///
    /// Rows are split into contiguous bands, one per worker thread. Workers read
    /// only `self` and write only their own band, then all are joined before
    /// this returns.
    pub fn next_generation(&self, workers: usize) -> Grid {
        let bands = partition_rows(self.height, workers);
        trace!(workers = bands.len(), width = self.width, height = self.height, "computing generation");

        let mut next = vec![Cell::DEAD; self.cells.len()];
        std::thread::scope(|scope| {
            let mut rest: &mut [Cell] = &mut next;
            for rows in bands {
                let (band, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * self.width);
                rest = tail;
                scope.spawn(move || self.fill_rows(rows, band));
            }
        });

        Grid { width: self.width, height: self.height, cells: next }
    }

    /// Replace this grid by its next generation.
    pub fn advance_generation(&mut self, workers: usize) {
        *self = self.next_generation(workers);
    }

    fn fill_rows(&self, rows: Range<usize>, band: &mut [Cell]) {
        for (y, out_row) in rows.zip(band.chunks_mut(self.width)) {
            for (x, out) in out_row.iter_mut().enumerate() {
                let current = self.cells[y * self.width + x];
                out.set_life_state(current.next_life_state(self.count_live_neighbors(x, y)));
            }
        }
    }
}

/// Split `0..height` into `workers` contiguous row ranges.
///
/// `workers` is clamped to `[1, height]`. Every range but the last holds
/// `height / workers` rows; the last one absorbs the remainder.
pub fn partition_rows(height: usize, workers: usize) -> Vec<Range<usize>> {
    if height == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, height);
    let per_worker = height / workers;

    (0..workers)
        .map(|i| {
            let start = i * per_worker;
            let end = if i == workers - 1 { height } else { start + per_worker };
            start..end
        })
        .collect()
}

fn checked_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(LifeError::ZeroDimension { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(LifeError::DimensionOverflow { width, height })
}
