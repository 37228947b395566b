//! Wilson's algorithm: loop-erased random walks into the growing tree.

use super::union_find::center_index;
use super::{carve_between, centers, lattice_neighbor, random_center};
use crate::error::{Error, Result};
use crate::grid::{Cell, Coord, Direction, Grid};
use crate::random::Lcg;

/// Step allowance per cell center for a single walk.
const WALK_STEPS_PER_CENTER: usize = 10_000;

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg) -> Result<()> {
    let w = grid.width();
    let start = random_center(grid, rng);
    grid.put(start, Cell::Path);

    let mut visited = vec![false; (w / 2) * (grid.height() / 2)];
    visited[center_index(start.x, start.y, w)] = true;
    let mut unvisited: Vec<Coord> = centers(grid).filter(|&c| c != start).collect();
    let budget = WALK_STEPS_PER_CENTER * (unvisited.len() + 1);

    while !unvisited.is_empty() {
        let mut current = unvisited[rng.below(unvisited.len())];
        let mut path = vec![current];
        let mut steps = 0;

        while !visited[center_index(current.x, current.y, w)] {
            steps += 1;
            if steps > budget {
                return Err(Error::GenerationStalled {
                    algorithm: "wilson",
                    steps: budget,
                });
            }
            let dir = Direction::from_index(rng.below(4));
            let Some(next) = lattice_neighbor(grid, current, dir) else {
                continue;
            };
            current = next;
            match path.iter().position(|&c| c == current) {
                Some(loop_at) => path.truncate(loop_at + 1),
                None => path.push(current),
            }
        }

        for pair in path.windows(2) {
            carve_between(grid, pair[0], pair[1]);
            visited[center_index(pair[0].x, pair[0].y, w)] = true;
        }
        unvisited.retain(|c| !visited[center_index(c.x, c.y, w)]);
    }
    Ok(())
}
