use crate::domain::ports::CarSelector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Picks uniformly at random among the free cars.
pub struct RandomCarSelector {
    rng: Mutex<StdRng>,
}

impl RandomCarSelector {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Same sequence of picks on every run.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomCarSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CarSelector for RandomCarSelector {
    fn pick(&self, candidates: &[u32]) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        candidates[rng.gen_range(0..candidates.len())]
    }
}

/// Always books the first free car.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCarSelector;

impl CarSelector for FirstCarSelector {
    fn pick(&self, candidates: &[u32]) -> u32 {
        candidates[0]
    }
}
