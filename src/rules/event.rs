//! Observable records of what a move changed.
//!
//! `GameState::apply` returns the events a move produced so a caller can
//! relay them to observers. Almost everything in this game is public; the
//! one exception is a drawn card, which every player except the one who
//! drew it gets to see.

use crate::core::{Card, Colour, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that happened as part of applying a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card left `player`'s hand for the table. `successful` is false
    /// when the card did not fit and went to the discard pile instead,
    /// costing a life.
    CardPlayed {
        player: PlayerId,
        slot: usize,
        card: Card,
        successful: bool,
    },
    /// A card was discarded for an information token.
    CardDiscarded {
        player: PlayerId,
        slot: usize,
        card: Card,
    },
    /// A replacement card was drawn into `slot`.
    CardDrawn {
        player: PlayerId,
        slot: usize,
        card: Card,
    },
    /// The deck was empty, so `slot` is now out of the game.
    SlotEmptied { player: PlayerId, slot: usize },
    /// `performer` told `target` which of their slots hold `colour`.
    ColourHinted {
        performer: PlayerId,
        target: PlayerId,
        colour: Colour,
        slots: Vec<usize>,
    },
    /// `performer` told `target` which of their slots hold `value`.
    ValueHinted {
        performer: PlayerId,
        target: PlayerId,
        value: u8,
        slots: Vec<usize>,
    },
}

impl GameEvent {
    /// Whether `viewer` is allowed to observe this event in full.
    ///
    /// A drawn card is hidden from the player who drew it; everything
    /// else is public.
    #[must_use]
    pub fn visible_to(&self, viewer: PlayerId) -> bool {
        match self {
            GameEvent::CardDrawn { player, .. } => *player != viewer,
            _ => true,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::CardPlayed {
                player,
                card,
                successful: true,
                ..
            } => write!(f, "{} played {}", player, card),
            GameEvent::CardPlayed {
                player,
                card,
                successful: false,
                ..
            } => write!(f, "{} misplayed {}", player, card),
            GameEvent::CardDiscarded { player, card, .. } => {
                write!(f, "{} discarded {}", player, card)
            }
            GameEvent::CardDrawn { player, slot, card } => {
                write!(f, "{} drew {} into slot {}", player, card, slot)
            }
            GameEvent::SlotEmptied { player, slot } => {
                write!(f, "{} emptied slot {}", player, slot)
            }
            GameEvent::ColourHinted {
                performer,
                target,
                colour,
                slots,
            } => write!(
                f,
                "{} told {} about {} ({} matching)",
                performer,
                target,
                colour,
                slots.len()
            ),
            GameEvent::ValueHinted {
                performer,
                target,
                value,
                slots,
            } => write!(
                f,
                "{} told {} about {}s ({} matching)",
                performer,
                target,
                value,
                slots.len()
            ),
        }
    }
}
