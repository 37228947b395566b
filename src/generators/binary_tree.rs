//! Binary tree: every center links north or west.

use super::centers;
use crate::grid::{Cell, Coord, Grid};
use crate::random::Lcg;

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg) {
    let all: Vec<Coord> = centers(grid).collect();
    for c in all {
        grid.put(c, Cell::Path);
        let north = rng.coin();
        if north && c.y > 1 {
            grid.put(Coord::new(c.x, c.y - 1), Cell::Path);
        } else if c.x > 1 {
            grid.put(Coord::new(c.x - 1, c.y), Cell::Path);
        }
    }
}
