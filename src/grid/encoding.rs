//! Integer encodings of a grid.
//!
//! Two forms are exposed to rendering and transport layers:
//!
//! - the binary matrix, `1` for traversable and `0` for wall, which loses
//!   the one-way and limited-pass detail;
//! - the extended code, a `u32` per cell with the kind in the low two bits
//!   and a payload above them:
//!
//! | tag | kind        | payload             |
//! |-----|-------------|---------------------|
//! | 0   | wall        | must be 0           |
//! | 1   | path        | must be 0           |
//! | 2   | one-way     | direction index 0-3 |
//! | 3   | limited     | capacity            |
//!
//! The extended code round-trips every cell kind.

use super::{Cell, Coord, Direction, Grid};
use crate::error::{Error, Result};

const TAG_BITS: u32 = 2;
const TAG_MASK: u32 = 0b11;

impl Cell {
    /// Extended wire code of this cell.
    pub fn code(self) -> u32 {
        match self {
            Cell::Wall => 0,
            Cell::Path => 1,
            Cell::OneWay(d) => 2 | ((d.index() as u32) << TAG_BITS),
            Cell::LimitedPass(n) => 3 | (u32::from(n) << TAG_BITS),
        }
    }

    /// Decodes an extended wire code.
    ///
    /// # Errors
    /// [`Error::InvalidCellCode`] for a non-zero payload on wall or path, a
    /// direction index above 3, or a capacity that does not fit in `u16`.
    pub fn from_code(code: u32) -> Result<Cell> {
        let payload = code >> TAG_BITS;
        match code & TAG_MASK {
            0 if payload == 0 => Ok(Cell::Wall),
            1 if payload == 0 => Ok(Cell::Path),
            2 if payload < 4 => Ok(Cell::OneWay(Direction::from_index(payload as usize))),
            3 => u16::try_from(payload)
                .map(Cell::LimitedPass)
                .map_err(|_| Error::InvalidCellCode(code)),
            _ => Err(Error::InvalidCellCode(code)),
        }
    }
}

impl Grid {
    /// `1` for traversable cells, `0` for walls, one row per inner vector.
    pub fn to_binary_matrix(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|c| u8::from(c.is_traversable())).collect())
            .collect()
    }

    pub fn to_code_matrix(&self) -> Vec<Vec<u32>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.code()).collect())
            .collect()
    }

    /// Rebuilds a grid from extended codes with the given endpoints.
    ///
    /// The endpoints are forced open, as with every other constructor.
    ///
    /// # Errors
    /// - [`Error::RaggedRows`] when rows differ in length
    /// - [`Error::DimensionsTooSmall`] for matrices below the minimum size
    /// - [`Error::InvalidCellCode`] for undecodable entries
    /// - [`Error::OutOfBounds`] for endpoints outside the matrix
    pub fn from_code_matrix(rows: &[Vec<u32>], start: Coord, goal: Coord) -> Result<Grid> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return Err(Error::RaggedRows);
        }
        let mut grid = Grid::blank(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                grid.put(Coord::new(x, y), Cell::from_code(code)?);
            }
        }
        grid.with_endpoints(start, goal)
    }
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
pub(super) struct GridRepr {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Coord,
    goal: Coord,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = Error;

    fn try_from(repr: GridRepr) -> Result<Grid> {
        let mut grid = Grid::blank(repr.width, repr.height)?;
        let expected = repr.width * repr.height;
        if repr.cells.len() != expected {
            return Err(Error::CellCountMismatch {
                width: repr.width,
                height: repr.height,
                expected,
                actual: repr.cells.len(),
            });
        }
        grid.cells = repr.cells;
        grid.with_endpoints(repr.start, repr.goal)
    }
}
