//! Counters describing the most recent search.

use serde::{Deserialize, Serialize};

/// What one call to `decide` did, reset at its start.
///
/// The counters tie out against each other: every iteration either ran a
/// simulation or scored a terminal world directly, so `simulations` can
/// trail `iterations`; `nodes_expanded` matches the tree's node count
/// minus the root.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Select/expand/backup cycles completed.
    pub iterations: u32,

    /// Determinized worlds the decision drew.
    pub worlds_sampled: u32,

    /// Nodes added to the tree.
    pub nodes_expanded: u32,

    /// Rollouts played to estimate a leaf.
    pub simulations: u32,

    /// Deepest node the tree grew.
    pub max_depth: u16,

    /// Wall time of the decision, in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Iteration throughput, zero when no time was recorded.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        Self::per_second(self.iterations, self.time_us)
    }

    /// Simulation throughput, zero when no time was recorded.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        Self::per_second(self.simulations, self.time_us)
    }

    fn per_second(count: u32, time_us: u64) -> f64 {
        if time_us == 0 {
            0.0
        } else {
            f64::from(count) * 1_000_000.0 / time_us as f64
        }
    }
}
