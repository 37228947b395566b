//! Walk simulation and fitness scoring.
//!
//! A chromosome is replayed from the start cell. Moves that cannot be made
//! (off the grid, into a wall, against a one-way cell, into an exhausted
//! limited-pass cell) cost `collision_penalty` and leave the walker in
//! place; fitness evaluation never fails.
//!
//! # Scoring
//!
//! With `maxD` the start-to-goal Manhattan distance and `d` the distance
//! after a move, each successful move adds:
//!
//! - `progress_weight` on a first visit, `path_length_weight` on a revisit
//! - `turns_weight` when the move differs from the previous successful move
//! - `(maxD - d) / maxD` to the running progress sum
//!
//! Reaching the goal adds `10000 + path_length_weight * path.len()` (the
//! path includes the start) and ends the walk. Afterwards the final
//! position adds `distance_weight * (maxD - d)` and the progress sum adds
//! `progress_weight * progress`.

use super::config::GaConfig;
use super::types::Move;
use crate::grid::{Coord, Grid};
use std::collections::HashMap;

/// Bonus for reaching the goal.
pub const GOAL_BONUS: f64 = 10_000.0;

/// One replayed gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry {
    /// Gene index.
    pub step: usize,
    pub attempted: Move,
    /// False when the move collided and the walker stayed put.
    pub moved: bool,
    /// Position after the step.
    pub position: Coord,
    /// Manhattan distance to the goal after the step.
    pub distance: usize,
}

/// Outcome of replaying one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub fitness: f64,
    /// Start plus every position reached by a successful move.
    pub path: Vec<Coord>,
    pub reached: bool,
    /// Genes consumed up to and including the one that reached the goal.
    pub steps_to_goal: Option<usize>,
    pub collisions: usize,
    pub trace: Option<Vec<TraceEntry>>,
}

/// Fitness weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub distance: f64,
    pub path_length: f64,
    pub turns: f64,
    pub progress: f64,
    pub collision: f64,
}

impl From<&GaConfig> for Weights {
    fn from(c: &GaConfig) -> Self {
        Self {
            distance: c.distance_weight,
            path_length: c.path_length_weight,
            turns: c.turns_weight,
            progress: c.progress_weight,
            collision: c.collision_penalty,
        }
    }
}

/// Scores chromosomes against one grid and pair of endpoints.
///
/// Holds no mutable state, so one evaluator can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct MazeFitness<'a> {
    grid: &'a Grid,
    start: Coord,
    goal: Coord,
    weights: Weights,
}

impl<'a> MazeFitness<'a> {
    pub fn new(grid: &'a Grid, start: Coord, goal: Coord, weights: Weights) -> Self {
        Self {
            grid,
            start,
            goal,
            weights,
        }
    }

    pub fn evaluate(&self, chromosome: &[Move]) -> f64 {
        self.simulate(chromosome, false).fitness
    }

    /// Replays `chromosome`, optionally recording a per-gene trace.
    pub fn simulate(&self, chromosome: &[Move], record_trace: bool) -> Walk {
        let w = self.weights;
        let grid = self.grid;
        let max_d = self.start.manhattan(self.goal);

        let mut pos = self.start;
        let mut path = vec![pos];
        let mut visited = vec![false; grid.width() * grid.height()];
        if grid.contains(pos) {
            visited[grid.ravel_index(pos)] = true;
        }
        let mut used: HashMap<Coord, u16> = HashMap::new();
        let mut last_move: Option<Move> = None;
        let mut progress = 0.0;
        let mut score = 0.0;
        let mut collisions = 0;
        let mut steps_to_goal = None;
        let mut trace = record_trace.then(Vec::new);

        for (step, &mv) in chromosome.iter().enumerate() {
            let moved = match self.try_step(pos, mv, &mut used) {
                Some(next) => {
                    pos = next;
                    path.push(pos);
                    let seen = &mut visited[grid.ravel_index(pos)];
                    if *seen {
                        score += w.path_length;
                    } else {
                        *seen = true;
                        score += w.progress;
                    }
                    if last_move.is_some_and(|m| m != mv) {
                        score += w.turns;
                    }
                    last_move = Some(mv);
                    if max_d > 0 {
                        let d = pos.manhattan(self.goal);
                        progress += (max_d as f64 - d as f64) / max_d as f64;
                    }
                    true
                }
                None => {
                    score += w.collision;
                    collisions += 1;
                    false
                }
            };

            if let Some(t) = trace.as_mut() {
                t.push(TraceEntry {
                    step,
                    attempted: mv,
                    moved,
                    position: pos,
                    distance: pos.manhattan(self.goal),
                });
            }

            if moved && pos == self.goal {
                score += GOAL_BONUS + w.path_length * path.len() as f64;
                steps_to_goal = Some(step + 1);
                break;
            }
        }

        let final_d = pos.manhattan(self.goal);
        score += w.distance * (max_d as f64 - final_d as f64);
        score += w.progress * progress;

        Walk {
            fitness: score,
            path,
            reached: steps_to_goal.is_some(),
            steps_to_goal,
            collisions,
            trace,
        }
    }

    /// The cell entered by `mv` from `pos`, charging a limited-pass use.
    fn try_step(&self, pos: Coord, mv: Move, used: &mut HashMap<Coord, u16>) -> Option<Coord> {
        let next = self.grid.step(pos, mv)?;
        let cell = self.grid[next];
        if !cell.admits(mv) {
            return None;
        }
        if let Some(capacity) = cell.capacity() {
            let spent = used.entry(next).or_insert(0);
            if *spent >= capacity {
                return None;
            }
            *spent += 1;
        }
        Some(next)
    }
}
