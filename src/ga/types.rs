//! Chromosome, individual and operator selectors.
//!
//! A chromosome is a fixed-length sequence of [`Move`]s replayed from the
//! start cell. Fitness is higher-is-better and unclamped.

use crate::grid::Direction;
use rand::Rng;

/// One gene: a single step in a cardinal direction.
pub type Move = Direction;

/// A uniformly random move.
pub fn random_move<R: Rng>(rng: &mut R) -> Move {
    Direction::from_index(rng.random_range(0..4))
}

/// A candidate move sequence and its last evaluated fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    pub chromosome: Vec<Move>,
    pub fitness: f64,
}

impl Individual {
    /// Wraps a chromosome with an unevaluated fitness of zero.
    pub fn new(chromosome: Vec<Move>) -> Self {
        Self {
            chromosome,
            fitness: 0.0,
        }
    }

    /// An individual with `len` uniformly random genes.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self::new((0..len).map(|_| random_move(rng)).collect())
    }

    /// Genes as a compact `NESW` string.
    pub fn genes(&self) -> String {
        self.chromosome.iter().map(|m| m.letter()).collect()
    }
}

/// Recombination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverType {
    /// One cut point; prefixes exchanged.
    #[default]
    SinglePoint,
    /// Two cut points; the middle segment exchanged.
    TwoPoint,
    /// Per-gene fair coin.
    Uniform,
}

/// Structural mutation applied before per-gene randomization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationType {
    /// Each gene, with probability `mutation_rate`, swaps with a random gene.
    #[default]
    Swap,
    /// With probability `mutation_rate`, one random segment is reversed.
    Inversion,
    /// With probability `mutation_rate`, one random segment is shuffled.
    Scramble,
}

/// How tournament acceptance probabilities map onto contestants.
///
/// Contestants are ranked best-first and rank `i` of `k` is accepted with
/// probability `(i / k)^pressure`; the fallback is the best contestant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TournamentBias {
    /// Formula applied to the best-first ranking as is. The best contestant
    /// has zero acceptance probability and is only reached by fallback, so
    /// weaker contestants are favored as pressure falls.
    #[default]
    Literal,
    /// Formula applied to the worst-first ranking, so the acceptance
    /// probability grows with fitness.
    FavorFittest,
}
