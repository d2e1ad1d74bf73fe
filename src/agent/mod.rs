//! The decision interface and baseline players.
//!
//! An [`Agent`] is asked for one move per turn, given a state it may
//! clone and mutate freely during deliberation. The two searchers in
//! this crate implement it, as do the baselines here: a uniform-random
//! player and a small fixed-priority rule player. The baselines double
//! as rollout delegates and as opponents in tests.

use crate::core::{GameRng, PlayerId};
use crate::rules::{GameState, Move, RulesError};
use crate::sampler::SampleError;
use std::fmt;

/// Why an agent could not produce a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecideError {
    /// Determinization hit contradictory hint knowledge.
    Sample(SampleError),
    /// A simulated move was rejected by the rules.
    Rules(RulesError),
    /// The position offers no legal move at all.
    NoLegalMoves { player: PlayerId },
}

impl fmt::Display for DecideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecideError::Sample(err) => write!(f, "world sampling failed: {}", err),
            DecideError::Rules(err) => write!(f, "simulation violated the rules: {}", err),
            DecideError::NoLegalMoves { player } => {
                write!(f, "{} has no legal move", player)
            }
        }
    }
}

impl std::error::Error for DecideError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecideError::Sample(err) => Some(err),
            DecideError::Rules(err) => Some(err),
            DecideError::NoLegalMoves { .. } => None,
        }
    }
}

impl From<SampleError> for DecideError {
    fn from(err: SampleError) -> Self {
        DecideError::Sample(err)
    }
}

impl From<RulesError> for DecideError {
    fn from(err: RulesError) -> Self {
        DecideError::Rules(err)
    }
}

/// A player: one move per turn, no state carried between turns beyond
/// configuration and RNG position.
pub trait Agent {
    /// Pick a move for `player`, who is about to act in `state`.
    ///
    /// `state` is typically a perspective (the agent's own cards
    /// hidden); agents that simulate forward determinize it first.
    fn decide_move(&mut self, state: &GameState, player: PlayerId)
        -> Result<Move, DecideError>;
}

/// Uniform-random legal play.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn decide_move(
        &mut self,
        state: &GameState,
        player: PlayerId,
    ) -> Result<Move, DecideError> {
        let legal = state.legal_moves(player);
        if legal.is_empty() {
            return Err(DecideError::NoLegalMoves { player });
        }
        Ok(legal[self.rng.gen_range_usize(0..legal.len())])
    }
}

/// A deterministic rule-of-thumb player.
///
/// Priority order: play a card known playable, hint a playable card the
/// holder cannot yet identify, discard a card known obsolete, discard
/// anything, hint anything, then whatever is left. Each step only
/// considers moves that are legal right now, so the first hit is always
/// playable.
#[derive(Clone, Debug, Default)]
pub struct PlaySafeAgent;

impl PlaySafeAgent {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn colour_hint_useful(state: &GameState, target: PlayerId, colour: crate::core::Colour) -> bool {
        state.hand(target).visible_cards().any(|(slot, card)| {
            card.colour == colour
                && state.table_value(card.colour) + 1 == card.value
                && state.hand(target).possible_colours(slot).len() > 1
        })
    }

    fn value_hint_useful(state: &GameState, target: PlayerId, value: u8) -> bool {
        state.hand(target).visible_cards().any(|(slot, card)| {
            card.value == value
                && state.table_value(card.colour) + 1 == card.value
                && state.hand(target).possible_values(slot).len() > 1
        })
    }
}

impl Agent for PlaySafeAgent {
    fn decide_move(
        &mut self,
        state: &GameState,
        player: PlayerId,
    ) -> Result<Move, DecideError> {
        let legal = state.legal_moves(player);
        if legal.is_empty() {
            return Err(DecideError::NoLegalMoves { player });
        }
        let hand = state.hand(player);

        // A card we know will land.
        for mv in &legal {
            if let Move::Play { slot } = mv {
                if let Some(card) = hand.known_card(*slot) {
                    if state.table_value(card.colour) + 1 == card.value {
                        return Ok(*mv);
                    }
                }
            }
        }

        // Point a teammate at a card they could play but cannot place.
        for mv in &legal {
            let useful = match mv {
                Move::HintColour {
                    player: target,
                    colour,
                } => Self::colour_hint_useful(state, *target, *colour),
                Move::HintValue {
                    player: target,
                    value,
                } => Self::value_hint_useful(state, *target, *value),
                _ => false,
            };
            if useful {
                return Ok(*mv);
            }
        }

        // Shed a card that can no longer matter.
        for mv in &legal {
            if let Move::Discard { slot } = mv {
                if let Some(card) = hand.known_card(*slot) {
                    if state.table_value(card.colour) >= card.value {
                        return Ok(*mv);
                    }
                }
            }
        }

        for mv in &legal {
            if matches!(mv, Move::Discard { .. }) {
                return Ok(*mv);
            }
        }
        for mv in &legal {
            if mv.is_hint() {
                return Ok(*mv);
            }
        }
        Ok(legal[0])
    }
}
