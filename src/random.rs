//! Random number sources.
//!
//! Maze generation runs on [`Lcg`], a tiny linear congruential generator
//! whose constants are fixed so that a seed always yields the same maze,
//! bit for bit. The GA runner uses [`create_rng`], a seeded `StdRng`, because
//! its draw volume would wrap the LCG period many times per run.

use rand::rngs::StdRng;
use rand::SeedableRng;

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Linear congruential generator: `state = (state * 9301 + 49297) mod 233280`.
///
/// Every draw advances the state exactly once, so two consumers issuing
/// draws in a different order diverge. Generators document their draw
/// order for that reason.
///
/// # Examples
///
/// ```
/// use u_maze::random::Lcg;
///
/// let mut a = Lcg::new(42);
/// let mut b = Lcg::new(42);
/// assert_eq!(a.next_f64(), b.next_f64());
/// assert_eq!(a.below(10), b.below(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Creates a generator whose first draw is derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Replaces the state.
    pub fn set_seed(&mut self, seed: u64) {
        self.state = seed;
    }

    /// Current raw state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advances the state and returns a float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        // Wide intermediate so that arbitrary u64 seeds cannot overflow.
        let next = (self.state as u128 * MULTIPLIER as u128 + INCREMENT as u128) % MODULUS as u128;
        self.state = next as u64;
        self.state as f64 / MODULUS as f64
    }

    /// `floor(next_f64() * n)`, the index draw used by every generator.
    ///
    /// Returns 0 for `n == 0` after still consuming a draw.
    pub fn below(&mut self, n: usize) -> usize {
        let r = self.next_f64();
        ((r * n as f64).floor() as usize).min(n.saturating_sub(1))
    }

    /// Coin flip in the `next > 0.5` form the generators use.
    pub fn coin(&mut self) -> bool {
        self.next_f64() > 0.5
    }
}

/// Seeded general-purpose RNG used by the GA runner.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
