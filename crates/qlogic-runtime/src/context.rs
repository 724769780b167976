//! Per-evaluation context handed to built-in functions

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mutable state a built-in function may use during one evaluation
#[derive(Debug, Clone)]
pub struct FunctionContext {
    rng: StdRng,
}

impl FunctionContext {
    /// Context with an entropy-seeded generator
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Context whose `rand()` draws are fixed by `seed`
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, entropy-seeded otherwise
    pub fn with_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    /// Uniform draw in `[0, 1)`
    pub fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl Default for FunctionContext {
    fn default() -> Self {
        Self::new()
    }
}
