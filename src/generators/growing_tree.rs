//! Growing tree with an even newest/random selection mix.

use super::{carve_between, lattice_neighbor, random_center};
use crate::grid::{Cell, Coord, Direction, Grid};
use crate::random::Lcg;

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg) {
    let start = random_center(grid, rng);
    grid.put(start, Cell::Path);
    let mut active = vec![start];

    while !active.is_empty() {
        let index = if rng.coin() {
            active.len() - 1
        } else {
            rng.below(active.len())
        };
        let current = active[index];

        let neighbors: Vec<Coord> = Direction::ALL
            .iter()
            .filter_map(|&d| lattice_neighbor(grid, current, d))
            .filter(|&n| grid[n].is_wall())
            .collect();

        if neighbors.is_empty() {
            active.remove(index);
        } else {
            let next = neighbors[rng.below(neighbors.len())];
            carve_between(grid, current, next);
            active.push(next);
        }
    }
}
