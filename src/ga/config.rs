//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the path solver: population and
//! operator settings, fitness weights, and what the run should report.

use super::types::{CrossoverType, MutationType, TournamentBias};
use crate::error::{Error, Result};

/// Configuration for the path-solving GA.
///
/// # Defaults
///
/// ```
/// use u_maze::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_maze::ga::{CrossoverType, GaConfig, MutationType};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_crossover_type(CrossoverType::Uniform)
///     .with_mutation_type(MutationType::Inversion)
///     .with_elitism_rate(0.05)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Per-gene probability used by both mutation passes (0.0–1.0).
    pub mutation_rate: f64,

    /// Contestants per tournament, drawn with replacement.
    pub tournament_size: usize,

    /// Fraction of the sorted population copied unchanged (0.0–1.0).
    pub elitism_rate: f64,

    /// Chromosome length is `width * height * path_length_multiplier`.
    pub path_length_multiplier: usize,

    /// Probability that a reproduction step recombines two parents
    /// instead of cloning one (0.0–1.0).
    pub crossover_rate: f64,

    pub crossover_type: CrossoverType,

    pub mutation_type: MutationType,

    /// Probability per reproduction step of overwriting a random slot of
    /// the next generation with a fresh random individual (0.0–1.0).
    pub diversity_pressure: f64,

    /// Exponent of the tournament acceptance curve.
    pub selection_pressure: f64,

    pub tournament_bias: TournamentBias,

    /// Reward per unit of Manhattan distance closed by the final position.
    pub distance_weight: f64,

    /// Added on every revisit and, times the path length, on reaching the
    /// goal. Negative values favor short paths.
    pub path_length_weight: f64,

    /// Added on every change of direction.
    pub turns_weight: f64,

    /// Added on every newly visited cell and, times the accumulated
    /// normalized progress, after the walk.
    pub progress_weight: f64,

    /// Added for every move that cannot be made.
    pub collision_penalty: f64,

    /// Random seed; `None` draws one from the OS.
    pub seed: Option<u64>,

    /// Record the best path of every generation.
    pub emit_history: bool,

    /// Also record every individual's path in the history.
    pub emit_population_paths: bool,

    /// Produce a step-by-step replay of the final best individual.
    pub emit_trace: bool,

    /// Evaluate the population with rayon (requires the `parallel` feature).
    pub parallel: bool,

    /// Stop as soon as a generation's best individual reaches the goal.
    pub stop_on_goal: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            mutation_rate: 0.05,
            tournament_size: 3,
            elitism_rate: 0.1,
            path_length_multiplier: 1,
            crossover_rate: 0.8,
            crossover_type: CrossoverType::default(),
            mutation_type: MutationType::default(),
            diversity_pressure: 0.05,
            selection_pressure: 1.0,
            tournament_bias: TournamentBias::default(),
            distance_weight: 10.0,
            path_length_weight: -1.0,
            turns_weight: -0.5,
            progress_weight: 1.0,
            collision_penalty: -5.0,
            seed: None,
            emit_history: false,
            emit_population_paths: false,
            emit_trace: false,
            parallel: false,
            stop_on_goal: false,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the elitism rate, clamped to `[0, 1]`.
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_path_length_multiplier(mut self, m: usize) -> Self {
        self.path_length_multiplier = m;
        self
    }

    /// Sets the crossover rate, clamped to `[0, 1]`.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_crossover_type(mut self, t: CrossoverType) -> Self {
        self.crossover_type = t;
        self
    }

    pub fn with_mutation_type(mut self, t: MutationType) -> Self {
        self.mutation_type = t;
        self
    }

    /// Sets the diversity pressure, clamped to `[0, 1]`.
    pub fn with_diversity_pressure(mut self, p: f64) -> Self {
        self.diversity_pressure = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the selection pressure; negative values become 0.
    pub fn with_selection_pressure(mut self, p: f64) -> Self {
        self.selection_pressure = p.max(0.0);
        self
    }

    pub fn with_tournament_bias(mut self, bias: TournamentBias) -> Self {
        self.tournament_bias = bias;
        self
    }

    /// Sets all five fitness weights at once.
    pub fn with_weights(
        mut self,
        distance: f64,
        path_length: f64,
        turns: f64,
        progress: f64,
        collision: f64,
    ) -> Self {
        self.distance_weight = distance;
        self.path_length_weight = path_length;
        self.turns_weight = turns;
        self.progress_weight = progress;
        self.collision_penalty = collision;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables per-generation history; `population_paths` also records
    /// every individual's path.
    pub fn with_history(mut self, population_paths: bool) -> Self {
        self.emit_history = true;
        self.emit_population_paths = population_paths;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.emit_trace = trace;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_stop_on_goal(mut self, stop: bool) -> Self {
        self.stop_on_goal = stop;
        self
    }

    /// Preset for small mazes and interactive use.
    ///
    /// - Population: 50, Generations: 50
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            ..Self::default()
        }
    }

    /// Preset balancing run time against success rate.
    ///
    /// - Population: 100, Generations: 150, Multiplier: 2
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            generations: 150,
            path_length_multiplier: 2,
            ..Self::default()
        }
    }

    /// Preset for large mazes.
    ///
    /// - Population: 200, Generations: 300, Multiplier: 3, Elitism: 0.05
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            generations: 300,
            path_length_multiplier: 3,
            elitism_rate: 0.05,
            ..Self::default()
        }
    }

    /// Picks a preset from the number of grid cells.
    ///
    /// - `cells < 150` → [`fast()`](Self::fast)
    /// - `150 ≤ cells < 600` → [`balanced()`](Self::balanced)
    /// - `cells ≥ 600` → [`quality()`](Self::quality)
    pub fn auto_select(cells: usize) -> Self {
        if cells < 150 {
            Self::fast()
        } else if cells < 600 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Chromosome length for a `width x height` grid.
    pub fn chromosome_length(&self, width: usize, height: usize) -> usize {
        width * height * self.path_length_multiplier
    }

    /// Checks every parameter.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.into()));
        if self.population_size == 0 {
            return invalid("population_size must be at least 1");
        }
        if self.generations == 0 {
            return invalid("generations must be at least 1");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.path_length_multiplier == 0 {
            return invalid("path_length_multiplier must be at least 1");
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("elitism_rate", self.elitism_rate),
            ("crossover_rate", self.crossover_rate),
            ("diversity_pressure", self.diversity_pressure),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidConfig(format!("{name} must lie in [0, 1], got {rate}")));
            }
        }
        if !self.selection_pressure.is_finite() || self.selection_pressure < 0.0 {
            return invalid("selection_pressure must be finite and non-negative");
        }
        let weights = [
            self.distance_weight,
            self.path_length_weight,
            self.turns_weight,
            self.progress_weight,
            self.collision_penalty,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return invalid("fitness weights must be finite");
        }
        Ok(())
    }
}
