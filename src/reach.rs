//! Exact reachability check.
//!
//! Breadth-first search from start to goal honoring every cell kind: walls
//! are never entered, one-way cells only by their admitted move, and a
//! limited-pass cell whose capacity is zero is never entered.
//!
//! The first path dequeued at the goal is a shortest one, and a shortest
//! walk never enters the same cell twice. Any walk that does can be cut down
//! to a simple path over a subset of its own moves, so a limited-pass cell
//! with capacity one or more can never be the reason a goal is unreachable.
//! Per-position visited flags are therefore exact, and the search stays
//! linear in the number of cells.

use crate::grid::{Coord, Direction, Grid};
use std::collections::VecDeque;
use tracing::trace;

/// Expansion order: south, north, east, west.
const EXPANSION: [Direction; 4] = [
    Direction::South,
    Direction::North,
    Direction::East,
    Direction::West,
];

/// Outcome of [`check_path`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reachability {
    pub found: bool,
    /// Start to goal inclusive; empty when `found` is false.
    pub path: Vec<Coord>,
}

impl Reachability {
    /// Number of moves on the path.
    pub fn moves(&self) -> Option<usize> {
        self.found.then(|| self.path.len() - 1)
    }
}

struct Node {
    pos: Coord,
    parent: Option<usize>,
}

/// Finds a shortest path from `start` to `goal`.
///
/// Returns `found = false` for disconnected grids and for endpoints
/// outside the grid. The start cell is never checked, whatever its kind.
///
/// # Examples
///
/// ```
/// use u_maze::grid::{Cell, Coord, Grid};
/// use u_maze::reach::check_path;
///
/// let mut grid = Grid::cleared(5, 5).unwrap();
/// grid.set(Coord::new(2, 1), Cell::Wall).unwrap();
/// let reach = check_path(&grid, grid.start(), grid.goal());
/// assert!(reach.found);
/// assert_eq!(reach.moves(), Some(4));
/// ```
pub fn check_path(grid: &Grid, start: Coord, goal: Coord) -> Reachability {
    if !grid.contains(start) || !grid.contains(goal) {
        return Reachability::default();
    }

    let mut arena = vec![Node { pos: start, parent: None }];
    let mut queue = VecDeque::from([0usize]);
    let mut visited = vec![false; grid.width() * grid.height()];
    visited[grid.ravel_index(start)] = true;

    while let Some(id) = queue.pop_front() {
        let pos = arena[id].pos;
        if pos == goal {
            let path = unwind(&arena, id);
            trace!(len = path.len(), expanded = arena.len(), "reachability found");
            return Reachability { found: true, path };
        }

        for dir in EXPANSION {
            let Some(next) = grid.step(pos, dir) else {
                continue;
            };
            let cell = grid[next];
            if !cell.admits(dir) || cell.capacity() == Some(0) {
                continue;
            }
            let seen = &mut visited[grid.ravel_index(next)];
            if !*seen {
                *seen = true;
                arena.push(Node { pos: next, parent: Some(id) });
                queue.push_back(arena.len() - 1);
            }
        }
    }

    trace!(expanded = arena.len(), "reachability exhausted");
    Reachability::default()
}

fn unwind(arena: &[Node], mut id: usize) -> Vec<Coord> {
    let mut path = vec![arena[id].pos];
    while let Some(parent) = arena[id].parent {
        path.push(arena[parent].pos);
        id = parent;
    }
    path.reverse();
    path
}
