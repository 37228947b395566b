//! Sidewinder.
//!
//! The first center row is one open corridor. Every later row is cut into
//! runs: a run grows east on a coin and otherwise closes by opening one
//! northward passage from a random cell of the run.

use crate::grid::{Cell, Coord, Grid};
use crate::random::Lcg;

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg) {
    let (w, h) = (grid.width(), grid.height());
    for x in 1..w - 1 {
        grid.put(Coord::new(x, 1), Cell::Path);
    }

    for y in (3..h - 1).step_by(2) {
        let mut run_start = 1;
        for x in (1..w - 1).step_by(2) {
            grid.put(Coord::new(x, y), Cell::Path);

            // The coin is only drawn when an east neighbor exists.
            let extend_east = x + 2 < w - 1 && rng.coin();
            if extend_east {
                grid.put(Coord::new(x + 1, y), Cell::Path);
            } else {
                let run_cells = (x - run_start) / 2 + 1;
                let opening = run_start + rng.below(run_cells) * 2;
                grid.put(Coord::new(opening, y - 1), Cell::Path);
                run_start = x + 2;
            }
        }
    }
}
