//! Seeded grid mazes and a genetic-algorithm path solver.
//!
//! - **Grid**: rectangular cell grid with walls, open cells, one-way cells
//!   and limited-pass cells; lossless integer wire encoding.
//! - **Generators**: ten classic carving algorithms driven by a seeded LCG,
//!   followed by an openness relaxation that knocks out walls to add loops.
//! - **Reachability**: breadth-first search that honours one-way entry and
//!   per-branch limited-pass budgets.
//! - **GA solver**: evolves fixed-length move sequences toward the goal.
//!
//! Every random choice is seed-controlled: the same inputs always produce the
//! same maze, and a [`GaConfig`] with a seed reproduces the same solve.
//!
//! ```
//! use u_maze::{check_path, generate, solve, Algorithm, GaConfig};
//!
//! let grid = generate(Algorithm::Dfs, 11, 11, 0.0, 42).unwrap();
//! let reach = check_path(&grid, grid.start(), grid.goal());
//! assert!(reach.found);
//!
//! let result = solve(&grid, &GaConfig::fast().with_generations(3).with_seed(7)).unwrap();
//! assert_eq!(result.fitness_history.len(), 3);
//! ```

pub mod error;
pub mod ga;
pub mod generators;
pub mod grid;
pub mod random;
pub mod reach;

pub use error::{Error, Result};
pub use ga::{GaConfig, GaRunner, SolveResult};
pub use generators::{generate, generate_named, Algorithm};
pub use grid::{Cell, Coord, Direction, Grid};
pub use reach::{check_path, Reachability};

/// Runs the GA from the grid's own start to its own goal.
pub fn solve(grid: &Grid, config: &GaConfig) -> Result<SolveResult> {
    GaRunner::run(grid, grid.start(), grid.goal(), config)
}

/// Runs the GA between explicit endpoints.
///
/// # Errors
/// [`Error::OutOfBounds`] when either endpoint lies outside the grid, plus
/// any [`GaConfig::validate`] failure.
pub fn solve_between(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    config: &GaConfig,
) -> Result<SolveResult> {
    GaRunner::run(grid, start, goal, config)
}
