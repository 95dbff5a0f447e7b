//! Injectable randomness for drift jitter and goal-gravity wobble.
//!
//! Every stochastic path in the engine flows through one `JitterSource`, so a
//! configured seed makes whole runs reproducible (and property tests exact).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of bounded random draws for state evolution.
pub trait JitterSource: Send {
    /// Uniform draw in `[lo, hi]`.
    fn jitter(&mut self, lo: f64, hi: f64) -> f64;
}

/// Default source backed by a seedable PRNG.
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl JitterSource for SeededJitter {
    fn jitter(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}

/// A source that always returns zero. Used in tests where drift must be inert.
pub struct ZeroJitter;

impl JitterSource for ZeroJitter {
    fn jitter(&mut self, _lo: f64, _hi: f64) -> f64 {
        0.0
    }
}
