use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::Board;

use super::participant::{Decision, Participant};

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Participant for RandomAgent {
    fn choose_action(&mut self, legal: &[usize], _board: &Board) -> Decision {
        assert!(!legal.is_empty(), "No legal columns available");
        let idx = self.rng.random_range(0..legal.len());
        Decision::Drop(legal[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
