// lib.rs - Conway's Game of Life on a toroidal board
//
// - `cell` -- a single cell and the survival/birth rule.
// - `grid` -- the flat cell matrix, wrap-around neighbor counting and the
//   multi-threaded generation advance.
// - `cursor` -- the marker used to pick a cell by hand.
// - `controller` -- board, cursor and run state behind one lock, with the
//   full command surface (advance, toggle, pause, speed, save, load).
// - `codec` -- the `<width>|<height>:<cells>` save format.
// - `patterns` -- named seed shapes and a deterministic random fill.
// - `history` -- detection of boards that settled into a short cycle.
// - `config` -- board size, worker count and update period.
// - `error` -- `LifeError` and the crate `Result` alias.

pub mod cell;
pub mod codec;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;

pub use cell::Cell;
pub use config::SimulationConfig;
pub use controller::{Command, CommandOutcome, Controller, Simulation};
pub use cursor::{Cursor, Direction};
pub use error::{LifeError, Result};
pub use grid::{Grid, partition_rows};
pub use patterns::{PATTERNS, Pattern};
