//! Crossover and mutation operators for move chromosomes.
//!
//! Every operator preserves chromosome length. Crossovers return two
//! children built from complementary parts of the parents; mutations work
//! in place.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: one cut, prefixes exchanged
//! - [`two_point_crossover`]: two cuts, middle segment exchanged
//! - [`uniform_crossover`]: per-gene fair coin
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: per-gene swap with a random position
//! - [`inversion_mutation`]: reverse one random segment
//! - [`scramble_mutation`]: shuffle one random segment
//! - [`randomize_genes`]: per-gene redraw, applied after the operators above
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, ch. 4

use super::types::{random_move, CrossoverType, Move, MutationType};
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Dispatches on `kind`.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn crossover<R: Rng>(
    kind: CrossoverType,
    parent1: &[Move],
    parent2: &[Move],
    rng: &mut R,
) -> (Vec<Move>, Vec<Move>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    match kind {
        CrossoverType::SinglePoint => single_point_crossover(parent1, parent2, rng),
        CrossoverType::TwoPoint => two_point_crossover(parent1, parent2, rng),
        CrossoverType::Uniform => uniform_crossover(parent1, parent2, rng),
    }
}

/// Cut point `c` drawn from `0..n`; child1 = `p1[..c] ++ p2[c..]`.
pub fn single_point_crossover<R: Rng>(
    parent1: &[Move],
    parent2: &[Move],
    rng: &mut R,
) -> (Vec<Move>, Vec<Move>) {
    let n = parent1.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }
    let cut = rng.random_range(0..n);
    (splice(parent1, parent2, cut, n), splice(parent2, parent1, cut, n))
}

/// Two independent cuts, ordered; child1 takes `p2` between them.
pub fn two_point_crossover<R: Rng>(
    parent1: &[Move],
    parent2: &[Move],
    rng: &mut R,
) -> (Vec<Move>, Vec<Move>) {
    let n = parent1.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (start, end) = (a.min(b), a.max(b));
    (
        splice_segment(parent1, parent2, start, end),
        splice_segment(parent2, parent1, start, end),
    )
}

/// Each position goes to child1 from either parent on a fair coin; child2
/// gets the other parent's gene.
pub fn uniform_crossover<R: Rng>(
    parent1: &[Move],
    parent2: &[Move],
    rng: &mut R,
) -> (Vec<Move>, Vec<Move>) {
    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| if rng.random::<f64>() < 0.5 { (a, b) } else { (b, a) })
        .unzip()
}

/// `head[..cut] ++ tail[cut..n]`
fn splice(head: &[Move], tail: &[Move], cut: usize, n: usize) -> Vec<Move> {
    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&head[..cut]);
    child.extend_from_slice(&tail[cut..]);
    child
}

/// `base` with `[start, end)` replaced by `donor`'s genes.
fn splice_segment(base: &[Move], donor: &[Move], start: usize, end: usize) -> Vec<Move> {
    let mut child = base.to_vec();
    child[start..end].copy_from_slice(&donor[start..end]);
    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Structural operator for `kind`, then [`randomize_genes`], both at `rate`.
pub fn mutate<R: Rng>(kind: MutationType, genes: &mut [Move], rate: f64, rng: &mut R) {
    match kind {
        MutationType::Swap => swap_mutation(genes, rate, rng),
        MutationType::Inversion => {
            if rng.random::<f64>() < rate {
                inversion_mutation(genes, rng);
            }
        }
        MutationType::Scramble => {
            if rng.random::<f64>() < rate {
                scramble_mutation(genes, rng);
            }
        }
    }
    randomize_genes(genes, rate, rng);
}

/// Each gene, with probability `rate`, swaps with a uniformly chosen gene.
pub fn swap_mutation<R: Rng>(genes: &mut [Move], rate: f64, rng: &mut R) {
    let n = genes.len();
    for i in 0..n {
        if rng.random::<f64>() < rate {
            let j = rng.random_range(0..n);
            genes.swap(i, j);
        }
    }
}

/// Reverses the inclusive segment `[start, end]`.
pub fn inversion_mutation<R: Rng>(genes: &mut [Move], rng: &mut R) {
    if let Some((start, end)) = random_segment(genes.len(), rng) {
        genes[start..=end].reverse();
    }
}

/// Fisher-Yates shuffle of the inclusive segment `[start, end]`.
pub fn scramble_mutation<R: Rng>(genes: &mut [Move], rng: &mut R) {
    if let Some((start, end)) = random_segment(genes.len(), rng) {
        let segment = &mut genes[start..=end];
        for i in (1..segment.len()).rev() {
            let j = rng.random_range(0..=i);
            segment.swap(i, j);
        }
    }
}

/// Each gene, with probability `rate`, is replaced by a uniform draw.
pub fn randomize_genes<R: Rng>(genes: &mut [Move], rate: f64, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = random_move(rng);
        }
    }
}

/// `start` uniform over `0..n`, `end` uniform over `start..n`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n == 0 {
        return None;
    }
    let start = rng.random_range(0..n);
    let end = rng.random_range(start..n);
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::Individual;
    use crate::random::create_rng;
    use proptest::prelude::*;

    const N: Move = Move::North;
    const S: Move = Move::South;

    fn counts(genes: &[Move]) -> [usize; 4] {
        let mut c = [0; 4];
        for g in genes {
            c[g.index()] += 1;
        }
        c
    }

    #[test]
    fn test_single_point_children_are_complementary() {
        let p1 = vec![N; 20];
        let p2 = vec![S; 20];
        let mut rng = create_rng(3);
        let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
        let cut = c1.iter().take_while(|&&g| g == N).count();
        assert!(c1[cut..].iter().all(|&g| g == S));
        assert!(c2[..cut].iter().all(|&g| g == S));
        assert!(c2[cut..].iter().all(|&g| g == N));
    }

    #[test]
    fn test_two_point_exchanges_middle() {
        let p1 = vec![N; 30];
        let p2 = vec![S; 30];
        let mut rng = create_rng(11);
        for _ in 0..50 {
            let (c1, c2) = two_point_crossover(&p1, &p2, &mut rng);
            for i in 0..30 {
                assert_ne!(c1[i], c2[i]);
            }
            // the S genes of c1 form one contiguous run
            let first = c1.iter().position(|&g| g == S);
            let last = c1.iter().rposition(|&g| g == S);
            if let (Some(a), Some(b)) = (first, last) {
                assert!(c1[a..=b].iter().all(|&g| g == S));
            }
        }
    }

    #[test]
    fn test_uniform_preserves_gene_pool() {
        let mut rng = create_rng(5);
        let p1 = Individual::random(64, &mut rng).chromosome;
        let p2 = Individual::random(64, &mut rng).chromosome;
        let (c1, c2) = uniform_crossover(&p1, &p2, &mut rng);
        for i in 0..64 {
            let mut pair = [c1[i], c2[i]];
            let mut parents = [p1[i], p2[i]];
            pair.sort();
            parents.sort();
            assert_eq!(pair, parents);
        }
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let mut rng = create_rng(9);
        let original = Individual::random(200, &mut rng).chromosome;
        for kind in [MutationType::Swap, MutationType::Inversion, MutationType::Scramble] {
            let mut genes = original.clone();
            mutate(kind, &mut genes, 0.0, &mut rng);
            assert_eq!(genes, original);
        }
    }

    #[test]
    fn test_mutation_rate_one_redraws_every_gene() {
        // All-North input: after a full redraw about three quarters of the
        // genes differ, and every direction shows up.
        let mut rng = create_rng(13);
        let mut genes = vec![N; 4000];
        randomize_genes(&mut genes, 1.0, &mut rng);
        let c = counts(&genes);
        for n in c {
            assert!((800..1200).contains(&n), "{c:?}");
        }
    }

    #[test]
    fn test_inversion_and_scramble_keep_multiset() {
        let mut rng = create_rng(21);
        let original = Individual::random(100, &mut rng).chromosome;
        let mut inv = original.clone();
        inversion_mutation(&mut inv, &mut rng);
        assert_eq!(counts(&inv), counts(&original));
        let mut scr = original.clone();
        scramble_mutation(&mut scr, &mut rng);
        assert_eq!(counts(&scr), counts(&original));
        let mut sw = original.clone();
        swap_mutation(&mut sw, 0.5, &mut rng);
        assert_eq!(counts(&sw), counts(&original));
    }

    #[test]
    fn test_empty_chromosomes() {
        let mut rng = create_rng(1);
        for kind in [CrossoverType::SinglePoint, CrossoverType::TwoPoint, CrossoverType::Uniform] {
            let (a, b) = crossover(kind, &[], &[], &mut rng);
            assert!(a.is_empty() && b.is_empty());
        }
        let mut genes: Vec<Move> = Vec::new();
        mutate(MutationType::Scramble, &mut genes, 1.0, &mut rng);
        assert!(genes.is_empty());
    }

    proptest! {
        #[test]
        fn prop_crossover_preserves_length(
            len in 0usize..300,
            kind in 0usize..3,
            seed in any::<u64>(),
        ) {
            let kind = [CrossoverType::SinglePoint, CrossoverType::TwoPoint, CrossoverType::Uniform][kind];
            let mut rng = create_rng(seed);
            let p1 = Individual::random(len, &mut rng).chromosome;
            let p2 = Individual::random(len, &mut rng).chromosome;
            let (c1, c2) = crossover(kind, &p1, &p2, &mut rng);
            prop_assert_eq!(c1.len(), len);
            prop_assert_eq!(c2.len(), len);
        }

        #[test]
        fn prop_mutation_preserves_length(
            len in 0usize..300,
            kind in 0usize..3,
            rate in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let kind = [MutationType::Swap, MutationType::Inversion, MutationType::Scramble][kind];
            let mut rng = create_rng(seed);
            let mut genes = Individual::random(len, &mut rng).chromosome;
            mutate(kind, &mut genes, rate, &mut rng);
            prop_assert_eq!(genes.len(), len);
        }
    }
}
