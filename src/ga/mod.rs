//! Genetic-algorithm path solver.
//!
//! Each individual is a fixed-length sequence of moves replayed from the
//! start cell. Fitness rewards closing distance to the goal and exploring new
//! cells, penalizes collisions, revisits and turns, and adds a large bonus on
//! arrival (see [`fitness`]).
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, operators, weights, presets)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`SolveResult`]: Best walk, fitness history and optional per-generation snapshots
//! - [`MazeFitness`]: Walk simulation and scoring
//!
//! # Submodules
//!
//! - [`operators`]: Single-point, two-point and uniform crossover; swap,
//!   inversion and scramble mutation
//! - [`fitness`]: Walk replay, traces and the scoring formula
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod fitness;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use fitness::{MazeFitness, TraceEntry, Walk, Weights};
pub use runner::{GaRunner, GenerationSnapshot, GenerationStats, SolveResult};
pub use selection::Tournament;
pub use types::{CrossoverType, Individual, Move, MutationType, TournamentBias};
