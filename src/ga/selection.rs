//! Pressure-weighted tournament selection.
//!
//! `k` contestants are drawn uniformly with replacement and ranked by
//! descending fitness. Walking the ranking, contestant `i` is accepted with
//! probability `(i / k)^pressure`; if nobody is accepted the top contestant
//! wins. [`TournamentBias`] decides which end of the ranking the formula is
//! applied from.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{Individual, TournamentBias};
use rand::Rng;

/// Tournament parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tournament {
    pub size: usize,
    pub pressure: f64,
    pub bias: TournamentBias,
}

impl Tournament {
    /// Selects a parent index from `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        let k = self.size.max(1);
        let n = population.len();

        let mut contestants: Vec<usize> = (0..k).map(|_| rng.random_range(0..n)).collect();
        contestants.sort_by(|&a, &b| population[b].fitness.total_cmp(&population[a].fitness));

        if self.bias == TournamentBias::FavorFittest {
            contestants.reverse();
        }
        for (i, &idx) in contestants.iter().enumerate() {
            let p = (i as f64 / k as f64).powf(self.pressure);
            if rng.random::<f64>() < p {
                return idx;
            }
        }

        // Fallback: the fittest contestant.
        match self.bias {
            TournamentBias::Literal => contestants[0],
            TournamentBias::FavorFittest => contestants[k - 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn population(fitness: &[f64]) -> Vec<Individual> {
        fitness
            .iter()
            .map(|&f| Individual {
                chromosome: Vec::new(),
                fitness: f,
            })
            .collect()
    }

    fn frequencies(t: Tournament, pop: &[Individual], trials: usize) -> Vec<usize> {
        let mut rng = create_rng(42);
        let mut counts = vec![0; pop.len()];
        for _ in 0..trials {
            counts[t.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_single_contestant_is_uniform() {
        // k = 1: rank 0 has probability 0 so the fallback always fires.
        let pop = population(&[1.0, 2.0, 3.0, 4.0]);
        let t = Tournament {
            size: 1,
            pressure: 1.0,
            bias: TournamentBias::Literal,
        };
        let counts = frequencies(t, &pop, 8000);
        for c in counts {
            assert!((1600..2400).contains(&c), "{c}");
        }
    }

    #[test]
    fn test_zero_pressure_accepts_first_ranked() {
        // (i/k)^0 = 1 for every rank, so the first ranked contestant wins.
        let pop = population(&[1.0, 5.0, 3.0]);
        let literal = Tournament {
            size: 3,
            pressure: 0.0,
            bias: TournamentBias::Literal,
        };
        let mut rng = create_rng(7);
        for _ in 0..200 {
            let mut probe = rng.clone();
            let picked = literal.select(&pop, &mut rng);
            // The winner is the best of the three drawn indices.
            let drawn: Vec<usize> = (0..3).map(|_| probe.random_range(0..3)).collect();
            let best = drawn
                .iter()
                .copied()
                .max_by(|&a, &b| pop[a].fitness.total_cmp(&pop[b].fitness))
                .unwrap();
            assert_eq!(pop[picked].fitness, pop[best].fitness);
        }
    }

    #[test]
    fn test_favor_fittest_prefers_high_fitness() {
        let pop = population(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let fittest = Tournament {
            size: 4,
            pressure: 1.0,
            bias: TournamentBias::FavorFittest,
        };
        let literal = Tournament {
            bias: TournamentBias::Literal,
            ..fittest
        };
        let hi = frequencies(fittest, &pop, 5000);
        let lo = frequencies(literal, &pop, 5000);
        let mean = |c: &[usize]| {
            c.iter().enumerate().map(|(i, &n)| i * n).sum::<usize>() as f64 / 5000.0
        };
        assert!(mean(&hi) > mean(&lo));
        assert!(hi[7] > hi[0]);
    }
}
