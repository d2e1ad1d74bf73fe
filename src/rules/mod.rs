//! Game rules: moves, observable events, and the state machine that
//! applies them.

pub mod action;
pub mod event;
pub mod state;

pub use action::Move;
pub use event::GameEvent;
pub use state::{
    hand_size_for, GameState, RulesError, MAX_INFORMATION, MAX_LIVES, MAX_SCORE,
};
