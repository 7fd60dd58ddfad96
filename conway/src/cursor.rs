// cursor.rs - Marker used to pick a cell for manual toggling

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Unclamped marker position. Coordinates may leave the grid in any direction;
/// [`Cursor::wrapped`] folds them back onto a torus of the given size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    x: i64,
    y: i64,
}

impl Cursor {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn move_to(&mut self, direction: Direction) {
        match direction {
            Direction::Up    => self.y -= 1,
            Direction::Down  => self.y += 1,
            Direction::Left  => self.x -= 1,
            Direction::Right => self.x += 1,
        }
    }

    pub fn set_position(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Cell addressed by the cursor on a `width` x `height` torus.
    pub fn wrapped(&self, width: usize, height: usize) -> (usize, usize) {
        (wrap(self.x, width), wrap(self.y, height))
    }
}

fn wrap(coord: i64, dim: usize) -> usize {
    let dim = i64::try_from(dim).unwrap_or(i64::MAX).max(1);
    // rem_euclid with a positive modulus is always in [0, dim)
    coord.rem_euclid(dim) as usize
}
