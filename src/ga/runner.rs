//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the generational loop:
//! initialization → evaluation → sort → best-ever update → elitism →
//! selection/crossover/mutation → diversity injection → repeat.

use super::config::GaConfig;
use super::fitness::{MazeFitness, TraceEntry, Weights};
use super::operators::{crossover, mutate};
use super::selection::Tournament;
use super::types::{Individual, Move};
use crate::error::{Error, Result};
use crate::grid::{Coord, Grid};
use crate::random::create_rng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    /// Fitness of the best individual seen in any generation.
    pub best_fitness: f64,

    /// Whether the best individual's walk reaches the goal.
    pub best_reached: bool,

    /// Start plus every cell the best individual moved into.
    pub best_path: Vec<Coord>,

    /// Genes consumed by the best individual to reach the goal.
    pub best_steps_to_goal: Option<usize>,

    pub best_chromosome: Vec<Move>,

    /// Generations evaluated.
    pub generations: usize,

    /// Whether the run was stopped through the cancellation flag.
    pub cancelled: bool,

    /// Best-ever fitness after each generation; never decreases.
    pub fitness_history: Vec<f64>,

    /// Step-by-step replay of the best individual, when requested.
    pub trace: Option<Vec<TraceEntry>>,

    /// Per-generation snapshots, when requested.
    pub history: Option<Vec<GenerationSnapshot>>,
}

/// The best individual of one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationSnapshot {
    pub generation: usize,
    pub fitness: f64,
    pub path: Vec<Coord>,
    pub reached: bool,
    pub steps_to_goal: Option<usize>,
    /// Every individual's path, best first.
    pub population_paths: Option<Vec<Vec<Coord>>>,
}

/// Statistics passed to the observer after each generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Best-ever fitness so far.
    pub best_fitness: f64,
    /// Best fitness within this generation.
    pub generation_best: f64,
    pub mean_fitness: f64,
    /// Whether this generation's best walk reaches the goal.
    pub reached: bool,
}

/// Executes the GA loop against a grid.
///
/// # Usage
///
/// ```
/// use u_maze::ga::{GaConfig, GaRunner};
/// use u_maze::grid::Grid;
///
/// let grid = Grid::cleared(7, 7).unwrap();
/// let config = GaConfig::fast().with_generations(5).with_seed(1);
/// let result = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
/// assert_eq!(result.fitness_history.len(), 5);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] when [`GaConfig::validate`] fails
    /// - [`Error::OutOfBounds`] when `start` or `goal` is outside the grid
    pub fn run(grid: &Grid, start: Coord, goal: Coord, config: &GaConfig) -> Result<SolveResult> {
        Self::run_with_cancel(grid, start, goal, config, None)
    }

    /// Runs the GA with an optional cancellation flag.
    ///
    /// The flag is checked after each generation's evaluation; once set, the
    /// run stops and returns the best individual found so far with
    /// `cancelled = true`.
    pub fn run_with_cancel(
        grid: &Grid,
        start: Coord,
        goal: Coord,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveResult> {
        Self::evolve(grid, start, goal, config, cancel, None)
    }

    /// Runs the GA, calling `observer` once per evaluated generation.
    pub fn run_with_observer<F>(
        grid: &Grid,
        start: Coord,
        goal: Coord,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> Result<SolveResult>
    where
        F: FnMut(&GenerationStats),
    {
        Self::evolve(grid, start, goal, config, cancel, Some(&mut observer))
    }

    fn evolve(
        grid: &Grid,
        start: Coord,
        goal: Coord,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: Option<&mut dyn FnMut(&GenerationStats)>,
    ) -> Result<SolveResult> {
        config.validate()?;
        for c in [start, goal] {
            if !grid.contains(c) {
                return Err(Error::OutOfBounds { x: c.x, y: c.y });
            }
        }

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = create_rng(seed);
        let fitness = MazeFitness::new(grid, start, goal, Weights::from(config));
        let tournament = Tournament {
            size: config.tournament_size,
            pressure: config.selection_pressure,
            bias: config.tournament_bias,
        };
        let chromosome_len = config.chromosome_length(grid.width(), grid.height());
        let elite_count = (config.population_size as f64 * config.elitism_rate).floor() as usize;

        info!(
            width = grid.width(),
            height = grid.height(),
            population = config.population_size,
            generations = config.generations,
            chromosome_len,
            seed,
            "ga solve started"
        );

        // 1. Initialize population
        let mut population: Vec<Individual> = (0..config.population_size)
            .map(|_| Individual::random(chromosome_len, &mut rng))
            .collect();

        // 2. Evaluate and track best
        evaluate_population(&fitness, &mut population, config.parallel);
        sort_descending(&mut population);
        let mut best = population[0].clone();

        let mut fitness_history = Vec::with_capacity(config.generations);
        let mut history = config.emit_history.then(Vec::new);
        let mut cancelled = false;
        let mut generations = 0;

        // 3. Evolutionary loop
        for gen in 0..config.generations {
            if gen > 0 {
                evaluate_population(&fitness, &mut population, config.parallel);
                sort_descending(&mut population);
                if population[0].fitness > best.fitness {
                    best = population[0].clone();
                }
            }
            fitness_history.push(best.fitness);
            generations = gen + 1;

            // The generation best is replayed only when something reads its walk.
            let gen_walk = (observer.is_some() || history.is_some() || config.stop_on_goal)
                .then(|| fitness.simulate(&population[0].chromosome, false));
            let reached = gen_walk.as_ref().is_some_and(|w| w.reached);
            let mean_fitness =
                population.iter().map(|i| i.fitness).sum::<f64>() / population.len() as f64;
            debug!(
                generation = gen,
                best = best.fitness,
                generation_best = population[0].fitness,
                mean = mean_fitness,
                reached = ?gen_walk.as_ref().map(|w| w.reached),
                "generation evaluated"
            );
            if let Some(observe) = observer.as_deref_mut() {
                observe(&GenerationStats {
                    generation: gen,
                    best_fitness: best.fitness,
                    generation_best: population[0].fitness,
                    mean_fitness,
                    reached,
                });
            }

            if let (Some(h), Some(walk)) = (history.as_mut(), gen_walk) {
                let population_paths = config.emit_population_paths.then(|| {
                    population
                        .iter()
                        .map(|ind| fitness.simulate(&ind.chromosome, false).path)
                        .collect()
                });
                h.push(GenerationSnapshot {
                    generation: gen,
                    fitness: walk.fitness,
                    path: walk.path,
                    reached: walk.reached,
                    steps_to_goal: walk.steps_to_goal,
                    population_paths,
                });
            }

            if let Some(flag) = cancel.as_ref() {
                if flag.load(Ordering::Relaxed) {
                    warn!(generation = gen, "ga solve cancelled");
                    cancelled = true;
                    break;
                }
            }
            if config.stop_on_goal && reached {
                debug!(generation = gen, "goal reached, stopping early");
                break;
            }
            if gen + 1 == config.generations {
                break;
            }

            population = reproduce(
                &population,
                config,
                &tournament,
                elite_count,
                chromosome_len,
                &mut rng,
            );
        }

        let walk = fitness.simulate(&best.chromosome, config.emit_trace);
        info!(
            generations,
            best_fitness = best.fitness,
            reached = walk.reached,
            steps_to_goal = walk.steps_to_goal,
            "ga solve finished"
        );

        Ok(SolveResult {
            best_fitness: best.fitness,
            best_reached: walk.reached,
            best_path: walk.path,
            best_steps_to_goal: walk.steps_to_goal,
            best_chromosome: best.chromosome,
            generations,
            cancelled,
            fitness_history,
            trace: walk.trace,
            history,
        })
    }
}

/// Builds the next generation from a population sorted best first.
fn reproduce<R: Rng>(
    population: &[Individual],
    config: &GaConfig,
    tournament: &Tournament,
    elite_count: usize,
    chromosome_len: usize,
    rng: &mut R,
) -> Vec<Individual> {
    let size = config.population_size;
    let mut next: Vec<Individual> = population[..elite_count.min(size)].to_vec();

    while next.len() < size {
        if rng.random::<f64>() < config.crossover_rate {
            let p1 = tournament.select(population, rng);
            let p2 = tournament.select(population, rng);
            let (mut c1, mut c2) = crossover(
                config.crossover_type,
                &population[p1].chromosome,
                &population[p2].chromosome,
                rng,
            );
            mutate(config.mutation_type, &mut c1, config.mutation_rate, rng);
            mutate(config.mutation_type, &mut c2, config.mutation_rate, rng);
            next.push(Individual::new(c1));
            if next.len() < size {
                next.push(Individual::new(c2));
            }
        } else {
            let idx = tournament.select(population, rng);
            next.push(population[idx].clone());
        }

        if rng.random::<f64>() < config.diversity_pressure {
            let slot = rng.random_range(0..next.len());
            next[slot] = Individual::random(chromosome_len, rng);
        }
    }
    next
}

/// Evaluate all individuals in the population.
fn evaluate_population(fitness: &MazeFitness<'_>, population: &mut [Individual], parallel: bool) {
    if parallel {
        #[cfg(feature = "parallel")]
        {
            population.par_iter_mut().for_each(|ind| {
                ind.fitness = fitness.evaluate(&ind.chromosome);
            });
            return;
        }
    }
    for ind in population.iter_mut() {
        ind.fitness = fitness.evaluate(&ind.chromosome);
    }
}

/// Stable sort, highest fitness first.
fn sort_descending(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{CrossoverType, MutationType, TournamentBias};
    use crate::generators::{generate, Algorithm};
    use crate::grid::Cell;

    fn open_7x7() -> Grid {
        Grid::cleared(7, 7).unwrap()
    }

    #[test]
    fn test_open_grid_reaches_goal() {
        let grid = open_7x7();
        let config = GaConfig::default()
            .with_population_size(50)
            .with_generations(30)
            .with_seed(42);
        let result = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();

        assert!(result.best_reached);
        assert!(result.best_fitness > 10_000.0 - 100.0);
        assert_eq!(result.best_path.first(), Some(&grid.start()));
        assert_eq!(result.best_path.last(), Some(&grid.goal()));
        let steps = result.best_steps_to_goal.unwrap();
        assert!(steps >= 8 && steps <= result.best_chromosome.len());
        assert_eq!(result.best_chromosome.len(), 49);
    }

    #[test]
    fn test_best_fitness_monotone() {
        let grid = generate(Algorithm::Prim, 11, 11, 20.0, 5).unwrap();
        let config = GaConfig::default()
            .with_population_size(30)
            .with_generations(25)
            .with_diversity_pressure(0.5)
            .with_seed(3);
        let result = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
        assert_eq!(result.fitness_history.len(), 25);
        for pair in result.fitness_history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(result.fitness_history.last(), Some(&result.best_fitness));
    }

    #[test]
    fn test_seed_reproducibility() {
        let grid = generate(Algorithm::Kruskal, 9, 9, 10.0, 1).unwrap();
        for crossover_type in [CrossoverType::SinglePoint, CrossoverType::TwoPoint, CrossoverType::Uniform] {
            for mutation_type in [MutationType::Swap, MutationType::Inversion, MutationType::Scramble] {
                let config = GaConfig::default()
                    .with_population_size(20)
                    .with_generations(8)
                    .with_crossover_type(crossover_type)
                    .with_mutation_type(mutation_type)
                    .with_tournament_bias(TournamentBias::FavorFittest)
                    .with_seed(99);
                let a = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
                let b = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_history_and_trace() {
        let grid = open_7x7();
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(4)
            .with_history(true)
            .with_trace(true)
            .with_seed(8);
        let result = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();

        let history = result.history.unwrap();
        assert_eq!(history.len(), 4);
        for (i, snap) in history.iter().enumerate() {
            assert_eq!(snap.generation, i);
            assert_eq!(snap.path.first(), Some(&grid.start()));
            let paths = snap.population_paths.as_ref().unwrap();
            assert_eq!(paths.len(), 10);
            assert_eq!(paths[0], snap.path);
        }

        let trace = result.trace.unwrap();
        let moved = trace.iter().filter(|t| t.moved).count();
        assert_eq!(moved + 1, result.best_path.len());
        if let Some(steps) = result.best_steps_to_goal {
            assert_eq!(trace.len(), steps);
        } else {
            assert_eq!(trace.len(), result.best_chromosome.len());
        }
    }

    #[test]
    fn test_no_history_by_default() {
        let grid = open_7x7();
        let config = GaConfig::fast().with_generations(2).with_seed(1);
        let result = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
        assert!(result.history.is_none());
        assert!(result.trace.is_none());
    }

    #[test]
    fn test_cancellation() {
        let grid = open_7x7();
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(1000)
            .with_seed(5);
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            GaRunner::run_with_cancel(&grid, grid.start(), grid.goal(), &config, Some(cancel))
                .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 1);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let grid = open_7x7();
        let config = GaConfig::default()
            .with_population_size(12)
            .with_generations(6)
            .with_seed(2);
        let mut seen = Vec::new();
        let result = GaRunner::run_with_observer(
            &grid,
            grid.start(),
            grid.goal(),
            &config,
            None,
            |s| seen.push(*s),
        )
        .unwrap();
        assert_eq!(seen.len(), 6);
        for (i, s) in seen.iter().enumerate() {
            assert_eq!(s.generation, i);
            assert!(s.generation_best <= s.best_fitness);
            assert!(s.mean_fitness <= s.generation_best);
            assert_eq!(s.best_fitness, result.fitness_history[i]);
        }
    }

    #[test]
    fn test_observer_and_history_leave_result_unchanged() {
        let grid = generate(Algorithm::Prim, 11, 11, 20.0, 8).unwrap();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(12)
            .with_seed(31);
        let plain = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
        let mut calls = 0;
        let observed =
            GaRunner::run_with_observer(&grid, grid.start(), grid.goal(), &config, None, |_| {
                calls += 1
            })
            .unwrap();
        assert_eq!(calls, 12);
        assert_eq!(plain, observed);

        let recorded =
            GaRunner::run(&grid, grid.start(), grid.goal(), &config.clone().with_history(false))
                .unwrap();
        assert_eq!(recorded.best_chromosome, plain.best_chromosome);
        assert_eq!(recorded.fitness_history, plain.fitness_history);
        assert_eq!(recorded.history.map(|h| h.len()), Some(12));
    }

    #[test]
    fn test_stop_on_goal() {
        // 5x5 open grid, goal two moves from start: some individual of the
        // first generation is bound to walk there.
        let grid = Grid::cleared(5, 5)
            .unwrap()
            .with_endpoints(Coord::new(1, 1), Coord::new(2, 2))
            .unwrap();
        let config = GaConfig::default()
            .with_population_size(60)
            .with_generations(50)
            .with_stop_on_goal(true)
            .with_seed(4);
        let result = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
        assert!(result.best_reached);
        assert!(result.generations < 50);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_elitism_keeps_best() {
        let grid = open_7x7();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(10)
            .with_elitism_rate(0.2)
            .with_diversity_pressure(0.0)
            .with_seed(6);
        let mut generation_bests = Vec::new();
        GaRunner::run_with_observer(&grid, grid.start(), grid.goal(), &config, None, |s| {
            generation_bests.push(s.generation_best)
        })
        .unwrap();
        // With elites carried unchanged and no injection, each generation's
        // best is at least the previous one.
        for pair in generation_bests.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let grid = open_7x7();
        let bad = GaConfig::default().with_population_size(0);
        assert!(matches!(
            GaRunner::run(&grid, grid.start(), grid.goal(), &bad),
            Err(Error::InvalidConfig(_))
        ));
        let config = GaConfig::fast();
        assert_eq!(
            GaRunner::run(&grid, Coord::new(7, 0), grid.goal(), &config),
            Err(Error::OutOfBounds { x: 7, y: 0 })
        );
    }

    #[test]
    fn test_walled_in_start_never_reaches() {
        let mut grid = Grid::blank(7, 7).unwrap();
        grid.set(Coord::new(2, 1), Cell::LimitedPass(0)).unwrap();
        let config = GaConfig::fast().with_generations(3).with_seed(10);
        let result = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
        assert!(!result.best_reached);
        assert_eq!(result.best_path, vec![grid.start()]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let grid = generate(Algorithm::Dfs, 11, 11, 30.0, 12).unwrap();
        let config = GaConfig::default()
            .with_population_size(40)
            .with_generations(10)
            .with_seed(77);
        let seq = GaRunner::run(&grid, grid.start(), grid.goal(), &config).unwrap();
        let par = GaRunner::run(&grid, grid.start(), grid.goal(), &config.clone().with_parallel(true))
            .unwrap();
        assert_eq!(seq, par);
    }
}
