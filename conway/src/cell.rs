// cell.rs - A single life cell and the Conway transition rule

/// One cell of the board. Has no identity beyond its grid position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub const DEAD: Cell = Cell { alive: false };
    pub const ALIVE: Cell = Cell { alive: true };

    pub fn new(alive: bool) -> Self {
        Self { alive }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set_life_state(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn invert_life(&mut self) {
        self.alive = !self.alive;
    }

    /// State of this cell in the next generation, given its live neighbor count.
    pub fn next_life_state(&self, live_neighbors: u8) -> bool {
        match (self.alive, live_neighbors) {
            (true, 2) | (true, 3) => true,   // Survival
            (false, 3)            => true,   // Birth
            _                     => false,  // Under/overpopulation, or stays dead
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        Self::new(alive)
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.alive
    }
}
