//! # fireworks-ai
//!
//! A determinization-based search engine for a cooperative card game of
//! hidden information.
//!
//! ## Design Principles
//!
//! 1. **Perspective States**: Searching players see their own cards only
//!    through hint-derived possibility sets. Hidden cards are reconstructed
//!    by sampling, never peeked at.
//!
//! 2. **Explicit Randomness**: Every random choice draws from a seeded
//!    `GameRng` threaded through the call, so any deal, sample, or search
//!    can be replayed exactly.
//!
//! 3. **Search Over Heuristics**: Play strength comes from simulating
//!    sampled worlds, with rule-based players serving only as rollout
//!    delegates and baselines.
//!
//! ## Architecture
//!
//! - **Determinization Ensemble**: One decision samples many worlds
//!   consistent with the player's knowledge and shares a single search
//!   tree across them, re-checking move legality per world.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` keeps the
//!   per-iteration world copies cheap.
//!
//! - **Pluggable Policies**: Rollouts delegate to anything implementing
//!   `Agent`, including the searchers themselves.
//!
//! ## Modules
//!
//! - `core`: Cards, decks, hands, players, RNG
//! - `rules`: Game state, legal moves, move application, events
//! - `sampler`: Hidden-hand determinization from hint constraints
//! - `agent`: The `Agent` trait and rule-based baseline players
//! - `mcts`: Ensemble Monte Carlo Tree Search
//! - `rmhc`: Random-mutation hill climbing over move plans

pub mod agent;
pub mod core;
pub mod mcts;
pub mod rmhc;
pub mod rules;
pub mod sampler;

// Re-export commonly used types
pub use crate::core::{
    Card, Colour, Deck, GameRng, Hand, PlayerId, PlayerMap, MAX_VALUE, MIN_VALUE,
};

pub use crate::rules::{
    hand_size_for, GameEvent, GameState, Move, RulesError, MAX_INFORMATION, MAX_LIVES, MAX_SCORE,
};

pub use crate::sampler::{sample_world, sample_worlds, SampleError, SlotCandidates};

pub use crate::agent::{Agent, DecideError, PlaySafeAgent, RandomAgent};

pub use crate::mcts::{
    AgentRollout, BestMovePolicy, Edge, MCTSConfig, MCTSNode, MCTSSearch, MCTSTree, NodeId,
    NoisyRollout, RandomRollout, RolloutPolicy, SearchStats, TreeStats,
};

pub use crate::rmhc::{Chromosome, RMHCConfig, RMHCSearch, RMHCStats};
