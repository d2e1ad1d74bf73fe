//! Random-mutation hill climbing over move plans.
//!
//! ## Overview
//!
//! A lightweight alternative to tree search built on the same
//! determinization layer. A fixed-length chromosome encodes the deciding
//! player's next moves; fitness is the mean score of replaying it across
//! several sampled worlds. The climber keeps a single incumbent and
//! accepts strictly improving mutations until its budget runs out.
//!
//! ## Usage
//!
//! ```rust
//! use fireworks_ai::rmhc::{RMHCConfig, RMHCSearch};
//! use fireworks_ai::rules::GameState;
//!
//! let state = GameState::new(3, 42);
//! let player = state.active_player();
//! let view = state.perspective(player);
//!
//! let config = RMHCConfig::default().with_generations(50).with_time_limit_ms(0);
//! let mut search = RMHCSearch::new(config);
//!
//! let mv = search.decide(&view, player).unwrap();
//! assert!(state.legal_moves(player).contains(&mv));
//! ```

pub mod chromosome;
pub mod config;
pub mod search;

// Re-export main types
pub use chromosome::Chromosome;
pub use config::RMHCConfig;
pub use search::{RMHCSearch, RMHCStats};
