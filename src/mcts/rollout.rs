//! Move sources for finishing a simulation beyond the tree.
//!
//! The policy seam is a trait so callers can plug in their own:
//! - `RandomRollout`: uniform random over legal moves
//! - `AgentRollout`: delegate each choice to an `Agent`
//! - `NoisyRollout`: delegate, but play randomly with probability epsilon

use crate::agent::Agent;
use crate::core::{GameRng, PlayerId};
use crate::rules::{GameState, Move};

/// Policy for choosing the simulated player's move during a rollout.
pub trait RolloutPolicy {
    /// Choose a move for `player` in `state`.
    ///
    /// Returns `None` if no legal moves exist or the policy cannot
    /// produce one; the caller substitutes a uniform-random legal move.
    fn choose_move(
        &mut self,
        state: &GameState,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Option<Move>;
}

/// Pick a uniform-random legal move, if any exist.
pub fn random_legal_move(state: &GameState, player: PlayerId, rng: &mut GameRng) -> Option<Move> {
    let legal = state.legal_moves(player);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range_usize(0..legal.len());
    Some(legal[idx])
}

/// Uniform random rollout policy.
///
/// Plays random legal moves until terminal or depth limit.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl RolloutPolicy for RandomRollout {
    fn choose_move(
        &mut self,
        state: &GameState,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Option<Move> {
        random_legal_move(state, player, rng)
    }
}

/// Rollout policy that delegates each choice to an [`Agent`].
///
/// A faulting delegate is reported via `tracing::debug!` and the step
/// falls back to a uniform-random legal move.
pub struct AgentRollout {
    agent: Box<dyn Agent>,
}

impl AgentRollout {
    /// Wrap an agent as a rollout policy.
    pub fn new(agent: Box<dyn Agent>) -> Self {
        Self { agent }
    }
}

impl RolloutPolicy for AgentRollout {
    fn choose_move(
        &mut self,
        state: &GameState,
        player: PlayerId,
        _rng: &mut GameRng,
    ) -> Option<Move> {
        match self.agent.decide_move(state, player) {
            Ok(mv) => Some(mv),
            Err(err) => {
                tracing::debug!(
                    target: "mcts::rollout",
                    player = player.index(),
                    error = %err,
                    "rollout delegate failed, substituting a random move"
                );
                None
            }
        }
    }
}

/// Rollout policy that follows an inner policy with probability
/// `1 - epsilon` and otherwise plays uniform-random.
pub struct NoisyRollout {
    epsilon: f64,
    inner: Box<dyn RolloutPolicy>,
}

impl NoisyRollout {
    /// Wrap `inner`, playing a random legal move with probability `epsilon`.
    pub fn new(epsilon: f64, inner: Box<dyn RolloutPolicy>) -> Self {
        Self { epsilon, inner }
    }
}

impl RolloutPolicy for NoisyRollout {
    fn choose_move(
        &mut self,
        state: &GameState,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Option<Move> {
        if rng.gen_bool(self.epsilon) {
            random_legal_move(state, player, rng)
        } else {
            self.inner.choose_move(state, player, rng)
        }
    }
}
