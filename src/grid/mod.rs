//! Grid model.
//!
//! A [`Grid`] is a row-major matrix of [`Cell`]s plus a start and a goal
//! coordinate. Both endpoints are open paths for the whole life of a grid:
//! every constructor forces them open and [`Grid::set`] refuses to close
//! them.
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row, matching
//! the lattice convention of the generators where cell centers sit at odd
//! coordinates.

mod cell;
mod encoding;

pub use cell::{Cell, Direction};

use crate::error::{Error, Result};
use std::fmt;

/// Smallest width or height accepted by any constructor.
pub const MIN_DIMENSION: usize = 5;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance.
    pub fn manhattan(self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// One step in `dir`, or `None` on underflow.
    ///
    /// Upper bounds are the grid's business, see [`Grid::step`].
    pub fn offset(self, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        Some(Coord {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular maze grid with start and goal.
///
/// Deserialization goes through the same checks as the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "encoding::GridRepr")
)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Coord,
    goal: Coord,
}

impl Grid {
    /// Creates a `width x height` grid filled with `fill`.
    ///
    /// The start is `(1, 1)` and the goal `(width - 2, height - 2)`; both are
    /// opened regardless of `fill`.
    ///
    /// # Errors
    /// [`Error::DimensionsTooSmall`] when either side is below [`MIN_DIMENSION`].
    pub fn new(width: usize, height: usize, fill: Cell) -> Result<Self> {
        let mut grid = Self::unpinned(width, height, fill)?;
        grid.open_endpoints();
        Ok(grid)
    }

    /// Like [`Grid::new`] but leaves the endpoint cells as `fill`.
    ///
    /// Generators carve on this and open the endpoints once at the end.
    pub(crate) fn unpinned(width: usize, height: usize, fill: Cell) -> Result<Self> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(Error::DimensionsTooSmall {
                width,
                height,
                min: MIN_DIMENSION,
            });
        }
        Ok(Grid {
            width,
            height,
            cells: vec![fill; width * height],
            start: Coord::new(1, 1),
            goal: Coord::new(width - 2, height - 2),
        })
    }

    /// An all-wall canvas with open endpoints; the starting state of a
    /// hand-drawn maze.
    pub fn blank(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, Cell::Wall)
    }

    /// An all-path canvas.
    pub fn cleared(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, Cell::Path)
    }

    /// Moves the endpoints, opening both cells.
    ///
    /// # Errors
    /// [`Error::OutOfBounds`] when either coordinate is outside the grid.
    pub fn with_endpoints(mut self, start: Coord, goal: Coord) -> Result<Self> {
        for c in [start, goal] {
            if !self.contains(c) {
                return Err(Error::OutOfBounds { x: c.x, y: c.y });
            }
        }
        self.start = start;
        self.goal = goal;
        self.open_endpoints();
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Row-major cell storage.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterator over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height
    }

    pub fn get(&self, c: Coord) -> Option<Cell> {
        self.contains(c).then(|| self.cells[self.ravel_index(c)])
    }

    /// Overwrites a cell.
    ///
    /// # Errors
    /// - [`Error::OutOfBounds`] for coordinates outside the grid
    /// - [`Error::EndpointOverwrite`] when `c` is the start or goal and
    ///   `cell` is not [`Cell::Path`]
    pub fn set(&mut self, c: Coord, cell: Cell) -> Result<()> {
        if !self.contains(c) {
            return Err(Error::OutOfBounds { x: c.x, y: c.y });
        }
        if (c == self.start || c == self.goal) && cell != Cell::Path {
            return Err(Error::EndpointOverwrite { x: c.x, y: c.y });
        }
        self.put(c, cell);
        Ok(())
    }

    /// The in-bounds neighbor of `c` in `dir`.
    pub fn step(&self, c: Coord, dir: Direction) -> Option<Coord> {
        c.offset(dir).filter(|&n| self.contains(n))
    }

    /// Number of 4-neighbors that are plain [`Cell::Path`].
    pub fn path_neighbors(&self, c: Coord) -> usize {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.step(c, d))
            .filter(|&n| self[n].is_path())
            .count()
    }

    pub fn count(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|&&c| pred(c)).count()
    }

    /// Nearest-neighbor rescale of the drawing to a new size.
    ///
    /// Each axis is scaled by `(new - 1) / (old - 1)`; target cells that map
    /// outside the old grid become walls. The endpoints are re-pinned to
    /// `(1, 1)` and `(width - 2, height - 2)`.
    pub fn resize(&self, width: usize, height: usize) -> Result<Grid> {
        let mut out = Grid::blank(width, height)?;
        let scale_x = (width - 1) as f64 / (self.width - 1) as f64;
        let scale_y = (height - 1) as f64 / (self.height - 1) as f64;
        for y in 0..height {
            for x in 0..width {
                let old = Coord::new(
                    (x as f64 / scale_x).floor() as usize,
                    (y as f64 / scale_y).floor() as usize,
                );
                if let Some(cell) = self.get(old) {
                    out.put(Coord::new(x, y), cell);
                }
            }
        }
        out.open_endpoints();
        Ok(out)
    }

    /// Unchecked write used by the generators.
    pub(crate) fn put(&mut self, c: Coord, cell: Cell) {
        let idx = self.ravel_index(c);
        self.cells[idx] = cell;
    }

    pub(crate) fn open_endpoints(&mut self) {
        self.put(self.start, Cell::Path);
        self.put(self.goal, Cell::Path);
    }

    pub(crate) fn ravel_index(&self, c: Coord) -> usize {
        c.y * self.width + c.x
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, c: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(c)]
    }
}

impl fmt::Display for Grid {
    /// Text rendering; `S` and `G` mark the endpoints.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let c = Coord::new(x, y);
                if c == self.start {
                    write!(f, "S")?;
                } else if c == self.goal {
                    write!(f, "G")?;
                } else {
                    write!(f, "{cell}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_opens_endpoints() {
        let grid = Grid::blank(7, 9).unwrap();
        assert_eq!(grid.start(), Coord::new(1, 1));
        assert_eq!(grid.goal(), Coord::new(5, 7));
        assert_eq!(grid[grid.start()], Cell::Path);
        assert_eq!(grid[grid.goal()], Cell::Path);
        assert_eq!(grid.count(Cell::is_path), 2);
    }

    #[test]
    fn test_too_small_rejected() {
        assert_eq!(
            Grid::blank(4, 10),
            Err(Error::DimensionsTooSmall {
                width: 4,
                height: 10,
                min: MIN_DIMENSION
            })
        );
        assert!(Grid::cleared(5, 5).is_ok());
    }

    #[test]
    fn test_set_guards_endpoints_and_bounds() {
        let mut grid = Grid::cleared(5, 5).unwrap();
        assert_eq!(
            grid.set(Coord::new(1, 1), Cell::Wall),
            Err(Error::EndpointOverwrite { x: 1, y: 1 })
        );
        assert_eq!(
            grid.set(Coord::new(5, 0), Cell::Wall),
            Err(Error::OutOfBounds { x: 5, y: 0 })
        );
        grid.set(Coord::new(2, 2), Cell::LimitedPass(2)).unwrap();
        assert_eq!(grid[Coord::new(2, 2)], Cell::LimitedPass(2));
        // Re-setting an endpoint to Path is allowed.
        assert!(grid.set(Coord::new(3, 3), Cell::Path).is_ok());
    }

    #[test]
    fn test_step_respects_bounds() {
        let grid = Grid::cleared(5, 5).unwrap();
        assert_eq!(grid.step(Coord::new(0, 0), Direction::North), None);
        assert_eq!(grid.step(Coord::new(0, 0), Direction::West), None);
        assert_eq!(grid.step(Coord::new(4, 4), Direction::East), None);
        assert_eq!(
            grid.step(Coord::new(2, 2), Direction::South),
            Some(Coord::new(2, 3))
        );
    }

    #[test]
    fn test_path_neighbors() {
        let grid = Grid::blank(5, 5).unwrap();
        // (1,2) touches the start at (1,1)
        assert_eq!(grid.path_neighbors(Coord::new(1, 2)), 1);
        assert_eq!(grid.path_neighbors(Coord::new(2, 2)), 0);
        let open = Grid::cleared(5, 5).unwrap();
        assert_eq!(open.path_neighbors(Coord::new(2, 2)), 4);
        assert_eq!(open.path_neighbors(Coord::new(0, 0)), 2);
    }

    #[test]
    fn test_with_endpoints() {
        let grid = Grid::blank(7, 7)
            .unwrap()
            .with_endpoints(Coord::new(0, 0), Coord::new(6, 6))
            .unwrap();
        assert_eq!(grid[Coord::new(0, 0)], Cell::Path);
        assert_eq!(grid[Coord::new(6, 6)], Cell::Path);
        assert!(Grid::blank(7, 7)
            .unwrap()
            .with_endpoints(Coord::new(0, 0), Coord::new(7, 0))
            .is_err());
    }

    #[test]
    fn test_resize_scales_drawing() {
        let mut grid = Grid::cleared(5, 5).unwrap();
        grid.set(Coord::new(2, 2), Cell::OneWay(Direction::East)).unwrap();
        let bigger = grid.resize(9, 9).unwrap();
        assert_eq!(bigger.width(), 9);
        // old (2,2) covers new (4,4) and (5,5) at scale 2
        assert_eq!(bigger[Coord::new(4, 4)], Cell::OneWay(Direction::East));
        assert_eq!(bigger[Coord::new(5, 5)], Cell::OneWay(Direction::East));
        assert_eq!(bigger.goal(), Coord::new(7, 7));
        assert_eq!(bigger[bigger.goal()], Cell::Path);

        let same = grid.resize(5, 5).unwrap();
        assert_eq!(same, grid);
    }

    #[test]
    fn test_display_marks_endpoints() {
        let grid = Grid::blank(5, 5).unwrap();
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "#####");
        assert_eq!(lines[1], "#S###");
        assert_eq!(lines[3], "###G#");
    }
}
