//! Seeded maze generators.
//!
//! Ten interchangeable carving strategies share one contract: start from an
//! all-wall grid, carve a spanning structure over the cell centers (odd
//! coordinates) with corridors on the even cells between them, open the
//! start and goal, then run the openness relaxation pass. Every random
//! decision is drawn from one [`Lcg`] seeded with the caller's seed, so the
//! same `(algorithm, width, height, openness, seed)` always yields the same
//! grid.
//!
//! # Algorithms
//!
//! | [`Algorithm`]             | Structure                                   |
//! |---------------------------|---------------------------------------------|
//! | `Dfs`                     | depth-first backtracker from `(1, 1)`       |
//! | `Prim`                    | randomized Prim over a wall frontier        |
//! | `Kruskal`                 | shuffled walls joined through union-find    |
//! | `RecursiveBacktracker`    | depth-first backtracker from a random cell  |
//! | `Sidewinder`              | row runs closed by a northward opening      |
//! | `Eller`                   | row-by-row set merging                      |
//! | `Wilson`                  | loop-erased random walks                    |
//! | `GrowingTree`             | newest/random active-cell mix               |
//! | `BinaryTree`              | one north-or-west coin per cell             |
//! | `HuntAndKill`             | random walk plus row-major hunt             |
//!
//! # References
//!
//! - Buck (2015), *Mazes for Programmers*
//! - Wilson (1996), "Generating random spanning trees more quickly than the cover time"
//! - Eller (1982), unpublished; as described by Buck

mod binary_tree;
mod dfs;
mod eller;
mod growing_tree;
mod hunt_and_kill;
mod kruskal;
mod prim;
mod sidewinder;
mod union_find;
mod wilson;

use crate::error::{Error, Result};
use crate::grid::{Cell, Coord, Direction, Grid};
use crate::random::Lcg;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Maze generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Dfs,
    Prim,
    Kruskal,
    RecursiveBacktracker,
    Sidewinder,
    Eller,
    Wilson,
    GrowingTree,
    BinaryTree,
    HuntAndKill,
}

impl Algorithm {
    pub const ALL: [Algorithm; 10] = [
        Algorithm::Dfs,
        Algorithm::Prim,
        Algorithm::Kruskal,
        Algorithm::RecursiveBacktracker,
        Algorithm::Sidewinder,
        Algorithm::Eller,
        Algorithm::Wilson,
        Algorithm::GrowingTree,
        Algorithm::BinaryTree,
        Algorithm::HuntAndKill,
    ];

    /// Stable identifier, the form accepted by [`FromStr`].
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Dfs => "dfs",
            Algorithm::Prim => "prim",
            Algorithm::Kruskal => "kruskal",
            Algorithm::RecursiveBacktracker => "recursiveBacktracker",
            Algorithm::Sidewinder => "sidewinder",
            Algorithm::Eller => "eller",
            Algorithm::Wilson => "wilson",
            Algorithm::GrowingTree => "growingTree",
            Algorithm::BinaryTree => "binaryTree",
            Algorithm::HuntAndKill => "huntAndKill",
        }
    }

    /// Lenient lookup: unknown names become [`Algorithm::Dfs`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(name, "unknown maze algorithm, falling back to dfs");
            Algorithm::Dfs
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Prim => "Prim's Algorithm",
            Algorithm::Kruskal => "Kruskal's Algorithm",
            Algorithm::RecursiveBacktracker => "Recursive Backtracker",
            Algorithm::Sidewinder => "Sidewinder",
            Algorithm::Eller => "Eller's Algorithm",
            Algorithm::Wilson => "Wilson's Algorithm",
            Algorithm::GrowingTree => "Growing Tree",
            Algorithm::BinaryTree => "Binary Tree",
            Algorithm::HuntAndKill => "Hunt-and-Kill",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts the camel-case ids and their snake/kebab spellings,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.id().to_ascii_lowercase() == key)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// Generates a maze.
///
/// # Errors
/// - [`Error::DimensionsTooSmall`] when `width` or `height` is below 5
/// - [`Error::InvalidOpenness`] when `openness` is outside `0..=100`
/// - [`Error::GenerationStalled`] if Wilson's walk exceeds its step budget
///
/// # Examples
///
/// ```
/// use u_maze::generators::{generate, Algorithm};
///
/// let a = generate(Algorithm::Kruskal, 15, 11, 10.0, 7).unwrap();
/// let b = generate(Algorithm::Kruskal, 15, 11, 10.0, 7).unwrap();
/// assert_eq!(a, b);
/// assert!(a[a.start()].is_path() && a[a.goal()].is_path());
/// ```
pub fn generate(
    algorithm: Algorithm,
    width: usize,
    height: usize,
    openness: f64,
    seed: u64,
) -> Result<Grid> {
    if !(0.0..=100.0).contains(&openness) {
        return Err(Error::InvalidOpenness(openness));
    }
    let mut grid = Grid::unpinned(width, height, Cell::Wall)?;
    let mut rng = Lcg::new(seed);
    carve(algorithm, &mut grid, &mut rng)?;
    patch_goal_corner(&mut grid);
    let opened = relax(&mut grid, &mut rng, openness);

    debug!(
        %algorithm,
        width,
        height,
        seed,
        opened,
        paths = grid.count(Cell::is_path),
        "maze generated"
    );
    Ok(grid)
}

fn carve(algorithm: Algorithm, grid: &mut Grid, rng: &mut Lcg) -> Result<()> {
    match algorithm {
        Algorithm::Dfs => dfs::carve(grid, rng, Coord::new(1, 1)),
        Algorithm::RecursiveBacktracker => {
            let start = random_center(grid, rng);
            dfs::carve(grid, rng, start)
        }
        Algorithm::Prim => prim::carve(grid, rng),
        Algorithm::Kruskal => kruskal::carve(grid, rng),
        Algorithm::Sidewinder => sidewinder::carve(grid, rng),
        Algorithm::Eller => eller::carve(grid, rng),
        Algorithm::Wilson => wilson::carve(grid, rng)?,
        Algorithm::GrowingTree => growing_tree::carve(grid, rng),
        Algorithm::BinaryTree => binary_tree::carve(grid, rng),
        Algorithm::HuntAndKill => hunt_and_kill::carve(grid, rng),
    }
    Ok(())
}

/// [`generate`] with a lenient algorithm name.
pub fn generate_named(
    name: &str,
    width: usize,
    height: usize,
    openness: f64,
    seed: u64,
) -> Result<Grid> {
    generate(Algorithm::from_name_or_default(name), width, height, openness, seed)
}

/// Opens the endpoints and the two cells next to the goal.
///
/// On even dimensions the goal is not a cell center and may otherwise be cut
/// off from the carved lattice.
fn patch_goal_corner(grid: &mut Grid) {
    grid.open_endpoints();
    let (w, h) = (grid.width(), grid.height());
    for c in [Coord::new(w - 2, h - 3), Coord::new(w - 3, h - 2)] {
        if grid[c].is_wall() {
            grid.put(c, Cell::Path);
        }
    }
}

/// Openness relaxation; returns the number of walls opened.
///
/// Scans the interior row-major on the live grid. Each wall with at least
/// one [`Cell::Path`] neighbor costs one draw and opens when the draw is
/// below `openness / 100`. Walls without a path neighbor draw nothing.
pub(crate) fn relax(grid: &mut Grid, rng: &mut Lcg, openness: f64) -> usize {
    let threshold = openness / 100.0;
    let mut opened = 0;
    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            let c = Coord::new(x, y);
            if grid[c].is_wall() && grid.path_neighbors(c) > 0 && rng.next_f64() < threshold {
                grid.put(c, Cell::Path);
                opened += 1;
            }
        }
    }
    opened
}

// ============================================================================
// Lattice helpers
// ============================================================================

/// Random cell center: `floor(next * ((dim - 2) / 2)) * 2 + 1`, x first.
pub(crate) fn random_center(grid: &Grid, rng: &mut Lcg) -> Coord {
    let mut axis = |dim: usize| {
        let span = (dim - 2) as f64 / 2.0;
        (rng.next_f64() * span).floor() as usize * 2 + 1
    };
    let x = axis(grid.width());
    let y = axis(grid.height());
    Coord::new(x, y)
}

/// The cell two steps from `c` in `dir`, if it lies strictly inside the border.
pub(crate) fn lattice_neighbor(grid: &Grid, c: Coord, dir: Direction) -> Option<Coord> {
    let n = c.offset(dir)?.offset(dir)?;
    (n.x > 0 && n.x < grid.width() - 1 && n.y > 0 && n.y < grid.height() - 1).then_some(n)
}

/// Opens two lattice cells and the corridor between them.
pub(crate) fn carve_between(grid: &mut Grid, a: Coord, b: Coord) {
    let mid = Coord::new((a.x + b.x) / 2, (a.y + b.y) / 2);
    grid.put(mid, Cell::Path);
    grid.put(a, Cell::Path);
    grid.put(b, Cell::Path);
}

/// Cell centers in row-major order.
pub(crate) fn centers(grid: &Grid) -> impl Iterator<Item = Coord> {
    let (w, h) = (grid.width(), grid.height());
    (1..h - 1)
        .step_by(2)
        .flat_map(move |y| (1..w - 1).step_by(2).map(move |x| Coord::new(x, y)))
}
