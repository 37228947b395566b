//! Eller's algorithm, one center row at a time.
//!
//! Set membership lives in a [`UnionFind`] over all centers, so merging two
//! sets is visible to every cell of both sets, including cells already
//! dropped into the next row.

use super::union_find::{center_index, UnionFind};
use crate::grid::{Cell, Coord, Grid};
use crate::random::Lcg;
use std::collections::HashSet;

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg) {
    let (w, h) = (grid.width(), grid.height());
    let mut sets = UnionFind::new((w / 2) * (h / 2));
    let id = |x: usize, y: usize| center_index(x, y, w);

    for y in (1..h - 1).step_by(2) {
        for x in (1..w - 1).step_by(2) {
            grid.put(Coord::new(x, y), Cell::Path);
        }

        let last_row = y + 3 >= h;
        // Horizontal pass over adjacent center pairs.
        for x in (1..w - 3).step_by(2) {
            let merge = if last_row {
                !sets.same(id(x, y), id(x + 2, y))
            } else {
                // Draw first, then compare sets.
                rng.coin() && !sets.same(id(x, y), id(x + 2, y))
            };
            if merge {
                grid.put(Coord::new(x + 1, y), Cell::Path);
                sets.unite(id(x, y), id(x + 2, y));
            }
        }
        if last_row {
            continue;
        }

        // Vertical pass: the first cell of each set always drops, the rest
        // on a coin. Roots are snapshotted so that drops do not reshuffle
        // membership mid-row.
        let roots: Vec<usize> = (1..w - 1)
            .step_by(2)
            .map(|x| sets.find(id(x, y)))
            .collect();
        let mut dropped = HashSet::new();
        for (x, &root) in (1..w - 1).step_by(2).zip(&roots) {
            let drop = dropped.insert(root) || rng.coin();
            if drop {
                grid.put(Coord::new(x, y + 1), Cell::Path);
                sets.unite(id(x, y), id(x, y + 2));
            }
        }
    }
}
