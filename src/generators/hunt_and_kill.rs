//! Hunt-and-kill.
//!
//! Random walk from a random start until stuck, then hunt row-major for the
//! first unvisited center bordering the carved region and resume from it.
//! Each hunt converts one center, so the loop ends after at most one round
//! per center.

use super::{carve_between, centers, lattice_neighbor, random_center};
use crate::grid::{Cell, Coord, Direction, Grid};
use crate::random::Lcg;

fn neighbors_where(grid: &Grid, c: Coord, pred: impl Fn(Cell) -> bool) -> Vec<Coord> {
    Direction::ALL
        .iter()
        .filter_map(|&d| lattice_neighbor(grid, c, d))
        .filter(|&n| pred(grid[n]))
        .collect()
}

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg) {
    let mut current = random_center(grid, rng);
    grid.put(current, Cell::Path);

    loop {
        // Walk.
        loop {
            let open = neighbors_where(grid, current, Cell::is_wall);
            if open.is_empty() {
                break;
            }
            let next = open[rng.below(open.len())];
            carve_between(grid, current, next);
            current = next;
        }

        // Hunt.
        let target = centers(grid).find_map(|c| {
            if !grid[c].is_wall() {
                return None;
            }
            let carved = neighbors_where(grid, c, Cell::is_path);
            (!carved.is_empty()).then_some((c, carved))
        });
        let Some((cell, carved)) = target else {
            break;
        };
        let link = carved[rng.below(carved.len())];
        carve_between(grid, cell, link);
        current = cell;
    }
}
