//! Randomized Prim over a frontier of walls.

use super::{carve_between, lattice_neighbor, random_center};
use crate::grid::{Cell, Coord, Direction, Grid};
use crate::random::Lcg;

const ORDER: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// A wall on the frontier and the unvisited center behind it.
#[derive(Debug, Clone, Copy)]
struct FrontierWall {
    from: Coord,
    next: Coord,
}

fn push_frontier(grid: &Grid, frontier: &mut Vec<FrontierWall>, from: Coord) {
    for &d in &ORDER {
        if let Some(next) = lattice_neighbor(grid, from, d) {
            let wall = Coord::new((from.x + next.x) / 2, (from.y + next.y) / 2);
            if grid[wall].is_wall() && grid[next].is_wall() {
                frontier.push(FrontierWall { from, next });
            }
        }
    }
}

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg) {
    let start = random_center(grid, rng);
    grid.put(start, Cell::Path);

    let mut frontier = Vec::new();
    push_frontier(grid, &mut frontier, start);

    while !frontier.is_empty() {
        let idx = rng.below(frontier.len());
        let FrontierWall { from, next } = frontier[idx];
        if grid[next].is_wall() {
            carve_between(grid, from, next);
            push_frontier(grid, &mut frontier, next);
        }
        // Order-preserving removal keeps later index draws aligned.
        frontier.remove(idx);
    }
}
