//! Depth-first backtracker.
//!
//! Shared by [`Algorithm::Dfs`](super::Algorithm::Dfs), which starts at
//! `(1, 1)`, and [`Algorithm::RecursiveBacktracker`](super::Algorithm::RecursiveBacktracker),
//! which draws a random start center first.

use super::{carve_between, lattice_neighbor};
use crate::grid::{Cell, Coord, Direction, Grid};
use crate::random::Lcg;

/// Neighbor order for the candidate list.
const ORDER: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg, start: Coord) {
    grid.put(start, Cell::Path);
    let mut stack = vec![start];

    while let Some(&top) = stack.last() {
        let neighbors: Vec<Coord> = ORDER
            .iter()
            .filter_map(|&d| lattice_neighbor(grid, top, d))
            .filter(|&n| grid[n].is_wall())
            .collect();

        if neighbors.is_empty() {
            stack.pop();
        } else {
            let next = neighbors[rng.below(neighbors.len())];
            carve_between(grid, top, next);
            stack.push(next);
        }
    }
}
