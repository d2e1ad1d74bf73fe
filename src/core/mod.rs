//! Core game primitives: cards, the deck, hands with hint knowledge,
//! players, and the deterministic RNG.
//!
//! Everything above this module (rules, sampling, search) is built out of
//! these types.

pub mod card;
pub mod deck;
pub mod hand;
pub mod player;
pub mod rng;

pub use card::{Card, Colour, MAX_VALUE, MIN_VALUE};
pub use deck::Deck;
pub use hand::Hand;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
