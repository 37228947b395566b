//! Cell and direction types.

use std::fmt;

/// One of the four cardinal directions.
///
/// Doubles as the GA move alphabet and as the tag stored on one-way cells.
/// `North` is `-y`, `South` is `+y`, `East` is `+x`, `West` is `-x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in N, E, S, W order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position in [`Direction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Inverse of [`index`](Self::index); wraps modulo 4.
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 4]
    }

    /// `(dx, dy)` of a single step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Single-letter form used in chromosome dumps.
    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A grid cell.
///
/// `OneWay(d)` carries a *facing* tag: the cell can only be entered by a
/// move in `d.opposite()`, so `OneWay(North)` accepts southward moves only.
///
/// `LimitedPass(n)` stores the capacity. Searches keep their own live
/// counters and never write them back; a capacity of zero blocks the cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Path,
    #[default]
    Wall,
    OneWay(Direction),
    LimitedPass(u16),
}

impl Cell {
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// True only for a plain open path.
    pub fn is_path(self) -> bool {
        matches!(self, Cell::Path)
    }

    /// True for every cell kind except walls.
    pub fn is_traversable(self) -> bool {
        !self.is_wall()
    }

    /// Whether a move in `movement` may enter this cell, ignoring capacity.
    pub fn admits(self, movement: Direction) -> bool {
        match self {
            Cell::Wall => false,
            Cell::Path | Cell::LimitedPass(_) => true,
            Cell::OneWay(facing) => movement == facing.opposite(),
        }
    }

    /// Capacity of a limited-pass cell.
    pub fn capacity(self) -> Option<u16> {
        match self {
            Cell::LimitedPass(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Cell::Path => ' ',
            Cell::Wall => '#',
            // Arrows show the permitted direction of travel.
            Cell::OneWay(Direction::North) => 'v',
            Cell::OneWay(Direction::East) => '<',
            Cell::OneWay(Direction::South) => '^',
            Cell::OneWay(Direction::West) => '>',
            Cell::LimitedPass(n) => char::from_digit(u32::from(*n).min(9), 10).unwrap_or('+'),
        };
        write!(f, "{symbol}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_and_rotation() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.rotate_cw().rotate_ccw(), d);
            assert_eq!(d.rotate_cw().rotate_cw(), d.opposite());
        }
        assert_eq!(Direction::North.rotate_cw(), Direction::East);
        assert_eq!(Direction::West.rotate_cw(), Direction::North);
    }

    #[test]
    fn test_delta_matches_opposite() {
        for d in Direction::ALL {
            let (dx, dy) = d.delta();
            let (ox, oy) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_one_way_entry_table() {
        // facing tag -> the only movement that may enter
        let table = [
            (Direction::North, Direction::South),
            (Direction::South, Direction::North),
            (Direction::East, Direction::West),
            (Direction::West, Direction::East),
        ];
        for (facing, allowed) in table {
            let cell = Cell::OneWay(facing);
            for movement in Direction::ALL {
                assert_eq!(cell.admits(movement), movement == allowed);
            }
        }
    }

    #[test]
    fn test_wall_never_admits() {
        for d in Direction::ALL {
            assert!(!Cell::Wall.admits(d));
            assert!(Cell::Path.admits(d));
            assert!(Cell::LimitedPass(0).admits(d));
        }
    }

    #[test]
    fn test_display_symbols() {
        assert_eq!(Cell::Wall.to_string(), "#");
        assert_eq!(Cell::Path.to_string(), " ");
        assert_eq!(Cell::LimitedPass(3).to_string(), "3");
        assert_eq!(Cell::LimitedPass(42).to_string(), "9");
        assert_eq!(Cell::OneWay(Direction::North).to_string(), "v");
    }
}
