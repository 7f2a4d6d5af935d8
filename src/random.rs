use std::{cell::RefCell, f64::consts::TAU, rc::Rc};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Shared random number generator used by probabilistic nodes.
///
/// Clones share one generator, so every node of a tree built from the same
/// `NodeConfig` draws from a single reproducible stream when seeded.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Rc<RefCell<StdRng>>,
}

impl RandomSource {
    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: Rc::new(RefCell::new(StdRng::from_entropy())),
        }
    }

    /// Deterministic generator: the same seed yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Rc::new(RefCell::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&self) -> f64 {
        self.rng.borrow_mut().gen::<f64>()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&self, len: usize) -> usize {
        self.rng.borrow_mut().gen_range(0..len)
    }

    /// Standard normal sample (mean 0, deviation 1), Box-Muller over two
    /// uniform draws.
    pub fn gaussian(&self) -> f64 {
        let mut rng = self.rng.borrow_mut();
        // 1 - [0, 1) keeps the logarithm finite
        let u1 = 1.0 - rng.gen::<f64>();
        let u2 = rng.gen::<f64>();

        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
