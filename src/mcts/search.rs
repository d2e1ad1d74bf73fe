//! Ensemble MCTS search over determinized worlds.
//!
//! One decision samples many worlds consistent with the deciding player's
//! knowledge and runs select/expand/rollout/backup cycles against each,
//! feeding all statistics into a single shared tree. Edges store the union
//! of moves seen legal in any world; each cycle re-filters them against
//! the world it is simulating.

use std::time::{Duration, Instant};

use crate::agent::{Agent, DecideError};
use crate::core::{GameRng, PlayerId};
use crate::rules::{GameState, Move, MAX_SCORE};
use crate::sampler::sample_worlds;

use super::config::{BestMovePolicy, MCTSConfig};
use super::node::{MCTSNode, NodeId};
use super::rollout::{RandomRollout, RolloutPolicy};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Owns the search tree, configuration, and rollout policy, and provides
/// [`decide`](MCTSSearch::decide) to pick a move from a perspective state.
pub struct MCTSSearch {
    /// Search configuration.
    config: MCTSConfig,

    /// The search tree, reset at the start of every decision.
    tree: MCTSTree,

    /// RNG forked once per decision.
    rng: GameRng,

    /// Rollout policy for the deciding player's simulated moves.
    rollout: Box<dyn RolloutPolicy>,

    /// Search statistics.
    stats: SearchStats,
}

impl MCTSSearch {
    /// Create a new MCTS search context.
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);

        Self {
            config,
            tree: MCTSTree::new(PlayerId::new(0)),
            rng,
            rollout: Box::new(RandomRollout),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom rollout policy.
    pub fn with_rollout<P: RolloutPolicy + 'static>(mut self, rollout: P) -> Self {
        self.rollout = Box::new(rollout);
        self
    }

    /// Pick a move for `player` from a perspective state.
    ///
    /// Samples `world_count` determinized worlds, spends
    /// `iteration_budget / world_count` passes cycling through them in
    /// shuffled order, and returns the best root move. A root with a
    /// single legal move is returned without spending any budget.
    pub fn decide(&mut self, state: &GameState, player: PlayerId) -> Result<Move, DecideError> {
        let start = Instant::now();
        self.stats.reset();

        let legal = state.legal_moves(player);
        if legal.is_empty() {
            return Err(DecideError::NoLegalMoves { player });
        }
        if legal.len() == 1 {
            return Ok(legal[0]);
        }

        let mut rng = self.rng.fork();
        let worlds = sample_worlds(state, player, self.config.world_count as usize, &mut rng)?;
        self.stats.worlds_sampled = worlds.len() as u32;

        self.tree.reset(player);

        let deadline = if self.config.time_limit_ms > 0 {
            Some(start + Duration::from_millis(self.config.time_limit_ms))
        } else {
            None
        };

        let passes = if worlds.is_empty() {
            0
        } else {
            self.config.iteration_budget / worlds.len() as u32
        };

        let mut order: Vec<usize> = (0..worlds.len()).collect();
        'search: for _ in 0..passes {
            rng.shuffle(&mut order);
            for &world_idx in &order {
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        break 'search;
                    }
                }
                let mut world = worlds[world_idx].clone();
                self.run_iteration(&mut world, player, &mut rng);
                self.stats.iterations += 1;
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        let chosen = {
            let root = self.tree.root_node();
            match self.config.best_move {
                BestMovePolicy::HighestMean => root.best_edge_by_mean().map(|e| e.mv),
                BestMovePolicy::MostVisits => root.best_edge_by_visits().map(|e| e.mv),
            }
        };

        match chosen {
            Some(mv) => Ok(mv),
            None => {
                tracing::debug!(
                    target: "mcts",
                    player = player.index(),
                    "no root edge was visited, falling back to a random legal move"
                );
                Ok(legal[rng.gen_range_usize(0..legal.len())])
            }
        }
    }

    /// One select/expand/rollout/backup cycle against a single world.
    fn run_iteration(&mut self, world: &mut GameState, decider: PlayerId, rng: &mut GameRng) {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();
        let mut needs_rollout = true;

        // === Selection and expansion ===
        loop {
            if world.is_game_over() {
                needs_rollout = false;
                break;
            }

            let depth = self.tree.get(current).depth;
            if self.config.tree_depth > 0 && u32::from(depth) >= self.config.tree_depth {
                break;
            }

            let player = world.active_player();
            let legal = world.legal_moves(player);
            if legal.is_empty() {
                needs_rollout = false;
                break;
            }

            // Merge this world's legal moves into the shared node.
            let candidates: Vec<usize> = legal
                .iter()
                .map(|&mv| self.tree.get_mut(current).ensure_edge(mv))
                .collect();

            let threshold = self.config.expansion_threshold.max(1);
            let untried: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&i| self.tree.get(current).edges[i].visits < threshold)
                .collect();

            let expanding = !untried.is_empty();
            let edge_idx = if expanding {
                untried[rng.gen_range_usize(0..untried.len())]
            } else {
                self.select_ucb(current, &candidates)
            };

            let mv = self.tree.get(current).edges[edge_idx].mv;
            if world.apply(player, mv).is_err() {
                break;
            }
            path.push((current, edge_idx));

            let child = self.tree.get(current).edges[edge_idx].child;
            current = if child.is_none() {
                self.expand_child(current, edge_idx, world)
            } else {
                child
            };

            if expanding {
                break;
            }
        }

        let reward = if needs_rollout {
            self.stats.simulations += 1;
            self.simulate(world, decider, rng)
        } else {
            f64::from(world.score())
        };

        self.backup(&path, current, reward);
    }

    /// UCB1 over the candidate edges, first maximal edge on ties.
    fn select_ucb(&self, node_id: NodeId, candidates: &[usize]) -> usize {
        if candidates.is_empty() {
            return 0;
        }

        let node = self.tree.get(node_id);
        let ln_parent = f64::from(node.visits.max(1)).ln();
        let max_score = f64::from(MAX_SCORE);

        let mut best = candidates[0];
        let mut best_score = f64::NEG_INFINITY;
        for &idx in candidates {
            let edge = &node.edges[idx];
            let score = if edge.visits == 0 {
                f64::INFINITY
            } else {
                edge.mean_reward() / max_score
                    + self.config.exploration_constant
                        * (ln_parent / f64::from(edge.visits)).sqrt()
            };
            if score > best_score {
                best = idx;
                best_score = score;
            }
        }
        best
    }

    /// Allocate the child node for an edge the world just stepped through.
    fn expand_child(&mut self, parent_id: NodeId, edge_idx: usize, world: &GameState) -> NodeId {
        let depth = self.tree.get(parent_id).depth + 1;
        if depth > self.stats.max_depth {
            self.stats.max_depth = depth;
        }

        let child = MCTSNode::new(parent_id, world.active_player(), depth);
        let child_id = self.tree.alloc(child);

        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;
        self.stats.nodes_expanded += 1;

        child_id
    }

    /// Play the world out from the expansion point and score it.
    ///
    /// The deciding player follows the rollout policy, everyone else plays
    /// uniform-random legal moves. A faulting or illegal policy choice is
    /// replaced by a uniform-random legal move for that step.
    fn simulate(&mut self, world: &mut GameState, decider: PlayerId, rng: &mut GameRng) -> f64 {
        let mut depth: u32 = 0;

        while !world.is_game_over() {
            if self.config.rollout_depth > 0 && depth >= self.config.rollout_depth {
                break;
            }

            let player = world.active_player();
            let legal = world.legal_moves(player);
            if legal.is_empty() {
                break;
            }

            let mv = if player == decider {
                match self.rollout.choose_move(world, player, rng) {
                    Some(mv) if legal.contains(&mv) => mv,
                    Some(bad) => {
                        tracing::debug!(
                            target: "mcts::rollout",
                            player = player.index(),
                            mv = %bad,
                            "rollout policy chose an illegal move, substituting a random one"
                        );
                        legal[rng.gen_range_usize(0..legal.len())]
                    }
                    None => legal[rng.gen_range_usize(0..legal.len())],
                }
            } else {
                legal[rng.gen_range_usize(0..legal.len())]
            };

            if world.apply(player, mv).is_err() {
                break;
            }
            depth += 1;
        }

        f64::from(world.score())
    }

    /// Backpropagate a reward along the traversed path.
    ///
    /// Every (node, edge) pair on the path gets a visit and the reward;
    /// the leaf gets a visit so its statistics count this simulation.
    fn backup(&mut self, path: &[(NodeId, usize)], leaf: NodeId, reward: f64) {
        for &(node_id, edge_idx) in path {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;

            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;
            edge.total_reward += reward;
        }

        self.tree.get_mut(leaf).visits += 1;
    }

    /// Get search statistics for the most recent decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Get move visit counts from the root.
    ///
    /// Returns (move, visit_count) pairs.
    pub fn root_visits(&self) -> Vec<(Move, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.mv, e.visits))
            .collect()
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

impl Agent for MCTSSearch {
    fn decide_move(&mut self, state: &GameState, player: PlayerId) -> Result<Move, DecideError> {
        self.decide(state, player)
    }
}
