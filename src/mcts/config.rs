//! Tuning knobs for the ensemble search.

use serde::{Deserialize, Serialize};

/// How the final move is chosen from the root once the budget is spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestMovePolicy {
    /// Highest mean reward, breaking ties by visit count.
    #[default]
    HighestMean,
    /// Highest visit count.
    MostVisits,
}

/// Parameters for one ensemble-search decision.
///
/// The iteration budget is split evenly across the sampled worlds, so
/// `iteration_budget / world_count` passes run over the ensemble. Both
/// limits that default to 0 mean "no limit".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCB1 exploration constant. Larger values spend more of the budget
    /// on rarely-visited moves.
    pub exploration_constant: f64,

    /// Total select/expand/rollout/backup cycles per decision.
    pub iteration_budget: u32,

    /// Determinized worlds sampled per decision.
    pub world_count: u32,

    /// Rollout length cap in moves, 0 for rollouts that run to game end.
    pub rollout_depth: u32,

    /// Tree depth cap, 0 for unlimited.
    pub tree_depth: u32,

    /// Visits an edge needs before UCB1 starts weighing it against its
    /// siblings. Treated as at least 1.
    pub expansion_threshold: u32,

    /// Wall-clock cap per decision in milliseconds, 0 for unlimited.
    /// Checked between iterations, so a decision can overrun by one.
    pub time_limit_ms: u64,

    /// Seed for world sampling and rollouts. Searches with equal seeds
    /// and inputs choose the same move.
    pub seed: u64,

    pub best_move: BestMovePolicy,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            iteration_budget: 10_000,
            world_count: 40,
            rollout_depth: 18,
            tree_depth: 0,
            expansion_threshold: 1,
            time_limit_ms: 1000,
            seed: 42,
            best_move: BestMovePolicy::HighestMean,
        }
    }
}

impl MCTSConfig {
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_iteration_budget(mut self, budget: u32) -> Self {
        self.iteration_budget = budget;
        self
    }

    pub fn with_world_count(mut self, worlds: u32) -> Self {
        self.world_count = worlds;
        self
    }

    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    pub fn with_tree_depth(mut self, depth: u32) -> Self {
        self.tree_depth = depth;
        self
    }

    pub fn with_expansion_threshold(mut self, threshold: u32) -> Self {
        self.expansion_threshold = threshold;
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

    pub fn with_best_move_policy(mut self, policy: BestMovePolicy) -> Self {
        self.best_move = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_game_sized() {
        let config = MCTSConfig::default();

        assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 1e-9);
        assert_eq!(config.iteration_budget, 10_000);
        assert_eq!(config.world_count, 40);
        assert_eq!(config.rollout_depth, 18);
        assert_eq!(config.tree_depth, 0);
        assert_eq!(config.expansion_threshold, 1);
        assert_eq!(config.time_limit_ms, 1000);
        assert_eq!(config.best_move, BestMovePolicy::HighestMean);
    }

    #[test]
    fn test_builders_chain() {
        let config = MCTSConfig::default()
            .with_exploration(2.0)
            .with_iteration_budget(400)
            .with_world_count(8)
            .with_rollout_depth(0)
            .with_tree_depth(6)
            .with_expansion_threshold(3)
            .with_time_limit_ms(50)
            .with_seed(123)
            .with_best_move_policy(BestMovePolicy::MostVisits);

        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.iteration_budget, 400);
        assert_eq!(config.world_count, 8);
        assert_eq!(config.rollout_depth, 0);
        assert_eq!(config.tree_depth, 6);
        assert_eq!(config.expansion_threshold, 3);
        assert_eq!(config.time_limit_ms, 50);
        assert_eq!(config.seed, 123);
        assert_eq!(config.best_move, BestMovePolicy::MostVisits);
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = MCTSConfig::default().with_seed(9).with_world_count(12);

        let json = serde_json::to_string(&config).unwrap();
        let restored: MCTSConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.seed, 9);
        assert_eq!(restored.world_count, 12);
        assert_eq!(restored.best_move, config.best_move);
    }
}
