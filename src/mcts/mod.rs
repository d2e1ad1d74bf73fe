//! Monte Carlo Tree Search over determinized worlds.
//!
//! ## Overview
//!
//! This module implements information-set MCTS for a cooperative game of
//! hidden information. Key features:
//!
//! - **Determinization ensemble**: Each decision samples many worlds
//!   consistent with the deciding player's knowledge
//! - **Shared tree**: All worlds feed statistics into one tree, with move
//!   legality re-checked per world during selection
//! - **Configurable rollouts**: Uniform random, agent-delegated, or noisy
//! - **Serializable**: Tree and config can be saved/loaded
//!
//! ## Usage
//!
//! ```rust
//! use fireworks_ai::core::PlayerId;
//! use fireworks_ai::mcts::{MCTSConfig, MCTSSearch};
//! use fireworks_ai::rules::GameState;
//!
//! let state = GameState::new(3, 42);
//! let player = state.active_player();
//!
//! // Search from the player's own view of the game.
//! let view = state.perspective(player);
//!
//! let config = MCTSConfig::default()
//!     .with_iteration_budget(400)
//!     .with_world_count(8);
//! let mut search = MCTSSearch::new(config);
//!
//! let mv = search.decide(&view, player).unwrap();
//! assert!(state.legal_moves(player).contains(&mv));
//! ```
//!
//! ## Custom Rollouts
//!
//! ```rust,ignore
//! use fireworks_ai::agent::PlaySafeAgent;
//! use fireworks_ai::mcts::{AgentRollout, MCTSConfig, MCTSSearch};
//!
//! let search = MCTSSearch::new(MCTSConfig::default())
//!     .with_rollout(AgentRollout::new(Box::new(PlaySafeAgent::new())));
//! ```

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::{BestMovePolicy, MCTSConfig};
pub use node::{Edge, MCTSNode, NodeId};
pub use rollout::{random_legal_move, AgentRollout, NoisyRollout, RandomRollout, RolloutPolicy};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
