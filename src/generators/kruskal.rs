//! Randomized Kruskal.
//!
//! Every center starts as its own set and is opened up front. Walls are
//! listed row-major (east before south), shuffled with Fisher-Yates, and
//! each wall joining two distinct sets is carved.

use super::centers;
use super::union_find::{center_index, UnionFind};
use crate::grid::{Cell, Coord, Grid};
use crate::random::Lcg;

/// Wall edge between two adjacent centers
#[derive(Debug, Clone, Copy)]
struct Edge {
    a: Coord,
    b: Coord,
}

impl Edge {
    fn wall(self) -> Coord {
        Coord::new((self.a.x + self.b.x) / 2, (self.a.y + self.b.y) / 2)
    }
}

pub(super) fn carve(grid: &mut Grid, rng: &mut Lcg) {
    let (w, h) = (grid.width(), grid.height());
    let mut edges = Vec::new();
    let all: Vec<Coord> = centers(grid).collect();
    for c in all {
        grid.put(c, Cell::Path);
        if c.x + 2 < w - 1 {
            edges.push(Edge { a: c, b: Coord::new(c.x + 2, c.y) });
        }
        if c.y + 2 < h - 1 {
            edges.push(Edge { a: c, b: Coord::new(c.x, c.y + 2) });
        }
    }

    for i in (1..edges.len()).rev() {
        let j = rng.below(i + 1);
        edges.swap(i, j);
    }

    let mut sets = UnionFind::new((w / 2) * (h / 2));
    for edge in edges {
        let a = center_index(edge.a.x, edge.a.y, w);
        let b = center_index(edge.b.x, edge.b.y, w);
        if sets.unite(a, b) {
            grid.put(edge.wall(), Cell::Path);
        }
    }
}
