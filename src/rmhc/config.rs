//! Tuning knobs for the hill climber.

use serde::{Deserialize, Serialize};

/// Parameters for one hill-climbing decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RMHCConfig {
    /// Genes per chromosome. Bounds how far ahead a plan can reach.
    pub chromosome_length: usize,

    /// Probability of re-randomizing each gene when mutating.
    pub mutation_rate: f64,

    /// Determinizations averaged per chromosome evaluation. More repeats
    /// smooth the fitness signal at linear cost.
    pub eval_repeats: u32,

    /// Hill-climbing generation cap, 0 for climbing until the deadline.
    pub generations: u32,

    /// Wall-clock cap per decision in milliseconds, 0 for unlimited.
    /// With both this and `generations` zero, no climbing happens and
    /// the initial random chromosome decides.
    pub time_limit_ms: u64,

    /// Seed for sampling, mutation, and replay. Equal seeds and inputs
    /// choose the same move.
    pub seed: u64,
}

impl Default for RMHCConfig {
    fn default() -> Self {
        Self {
            chromosome_length: 30,
            mutation_rate: 0.5,
            eval_repeats: 5,
            generations: 0,
            time_limit_ms: 1000,
            seed: 42,
        }
    }
}

impl RMHCConfig {
    pub fn with_chromosome_length(mut self, length: usize) -> Self {
        self.chromosome_length = length;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_eval_repeats(mut self, repeats: u32) -> Self {
        self.eval_repeats = repeats;
        self
    }

    pub fn with_generations(mut self, generations: u32) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_time_limit_ms(mut self, millis: u64) -> Self {
        self.time_limit_ms = millis;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
