// codec.rs - Flat save format
//
//   <width>|<height>:<cells>
//
// `<cells>` holds width * height bytes in row-major order, '0' for a dead cell
// and any other byte for a live one. Written canonically as '1'. The format is
// byte oriented: cells are counted per byte and need not be valid UTF-8.

use std::fs;
use std::path::Path;

use crate::cell::Cell;
use crate::error::{LifeError, Result};
use crate::grid::Grid;

const DIMENSION_SEPARATOR: u8 = b'|';
const HEADER_END: u8 = b':';
const DEAD: u8 = b'0';
const ALIVE: u8 = b'1';

pub fn encode(grid: &Grid) -> String {
    let header = format!(
        "{}{}{}{}",
        grid.width(),
        char::from(DIMENSION_SEPARATOR),
        grid.height(),
        char::from(HEADER_END)
    );
    let mut out = String::with_capacity(header.len() + grid.cells().len());
    out.push_str(&header);
    out.extend(grid.cells().iter().map(|c| char::from(if c.is_alive() { ALIVE } else { DEAD })));
    out
}

pub fn decode(text: &str) -> Result<Grid> {
    decode_bytes(text.as_bytes())
}

pub fn decode_bytes(data: &[u8]) -> Result<Grid> {
    let (width, rest) = split_once(data, DIMENSION_SEPARATOR)?;
    let (height, cells) = split_once(rest, HEADER_END)?;

    let width = parse_dimension("width", width)?;
    let height = parse_dimension("height", height)?;
    let cells = cells.iter().map(|&b| Cell::new(b != DEAD)).collect();

    Grid::from_cells(width, height, cells)
}

fn split_once(data: &[u8], delimiter: u8) -> Result<(&[u8], &[u8])> {
    let at = data
        .iter()
        .position(|&b| b == delimiter)
        .ok_or(LifeError::MissingDelimiter { delimiter: char::from(delimiter) })?;
    Ok((&data[..at], &data[at + 1..]))
}

/// Base-10 digits only: no sign, no surrounding whitespace.
fn parse_dimension(field: &'static str, value: &[u8]) -> Result<usize> {
    let invalid = || LifeError::InvalidDimension {
        field,
        value: String::from_utf8_lossy(value).into_owned(),
    };
    if value.is_empty() || !value.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    value.iter().try_fold(0usize, |acc, &digit| {
        acc.checked_mul(10)?.checked_add(usize::from(digit - b'0'))
    })
    .ok_or_else(invalid)
}

pub fn save_to_file(grid: &Grid, path: &Path) -> Result<()> {
    fs::write(path, encode(grid)).map_err(|source| LifeError::Io { path: path.to_owned(), source })
}

pub fn load_from_file(path: &Path) -> Result<Grid> {
    let data = fs::read(path).map_err(|source| LifeError::Io { path: path.to_owned(), source })?;
    decode_bytes(&data)
}
