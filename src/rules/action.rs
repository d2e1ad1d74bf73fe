//! The four things a player can do on their turn.
//!
//! Slot-indexed moves (`Play`, `Discard`) refer to positions in the acting
//! player's own hand; hint moves name another player and a colour or
//! value actually present in that player's hand.

use crate::core::{Colour, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single turn's move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Play the card in `slot` onto the table.
    Play { slot: usize },
    /// Discard the card in `slot` for an information token.
    Discard { slot: usize },
    /// Tell `player` which of their cards are `colour`.
    HintColour { player: PlayerId, colour: Colour },
    /// Tell `player` which of their cards have `value`.
    HintValue { player: PlayerId, value: u8 },
}

impl Move {
    /// Whether this move spends an information token.
    #[must_use]
    pub fn is_hint(&self) -> bool {
        matches!(self, Move::HintColour { .. } | Move::HintValue { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play { slot } => write!(f, "play slot {}", slot),
            Move::Discard { slot } => write!(f, "discard slot {}", slot),
            Move::HintColour { player, colour } => {
                write!(f, "tell {} about {}", player, colour)
            }
            Move::HintValue { player, value } => {
                write!(f, "tell {} about {}s", player, value)
            }
        }
    }
}
