// error.rs - Error types for the conway crate
// Every fallible operation returns `LifeError` through the `Result` alias.

use std::path::PathBuf;

/// Errors raised while addressing, saving or loading a grid.
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    /// The save file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A header delimiter is absent from the encoded grid.
    #[error("missing '{delimiter}' delimiter in saved grid")]
    MissingDelimiter {
        /// The delimiter that was expected.
        delimiter: char,
    },

    /// Width or height is not a plain base-10 unsigned integer.
    #[error("invalid {field} {value:?} in saved grid")]
    InvalidDimension {
        /// Which header field failed (`"width"` or `"height"`).
        field: &'static str,
        /// The raw text found in the header.
        value: String,
    },

    /// A grid needs at least one row and one column.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// `width * height` does not fit in memory addressing.
    #[error("grid dimensions {width}x{height} overflow")]
    DimensionOverflow {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// The cell sequence does not hold exactly `width * height` cells.
    #[error("expected {expected} cells in saved grid, found {found}")]
    CellCountMismatch {
        /// `width * height` from the header.
        expected: usize,
        /// Number of cell characters actually present.
        found: usize,
    },

    /// A cell coordinate lies outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LifeError>;
