//! Determinization: reconstructing concrete hidden hands.
//!
//! A search cannot simulate forward from a perspective state, because the
//! deciding player's own cards have no identities there. The sampler
//! turns one perspective into a *world*: every hidden slot bound to a
//! card consistent with the slot's hint knowledge, the bound cards
//! removed from the simulated deck, and the remainder reshuffled.
//!
//! Binding processes slots most-constrained-first (ascending candidate
//! count), so a slot with one possible identity claims its card before a
//! looser slot can steal it. Candidate lists keep one entry per deck
//! copy, which makes the uniform pick weight identities by how many
//! copies remain unseen.

use crate::core::{Card, GameRng, PlayerId};
use crate::rules::GameState;
use std::fmt;

/// Determinization failure.
///
/// This is not a search problem: it means the hint bookkeeping upstream
/// contradicted itself, so it is surfaced instead of being papered over
/// with an arbitrary binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SampleError {
    /// A hidden slot has no candidate card left once earlier bindings
    /// took theirs.
    EmptySlotConstraint { player: PlayerId, slot: usize },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::EmptySlotConstraint { player, slot } => {
                write!(
                    f,
                    "no candidate card satisfies {}'s constraints for slot {}",
                    player, slot
                )
            }
        }
    }
}

impl std::error::Error for SampleError {}

/// The cards one hidden slot could hold, one entry per unseen deck copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotCandidates {
    pub slot: usize,
    pub cards: Vec<Card>,
}

/// Candidate lists for every hidden slot of `player`, filtered from the
/// perspective deck by the slot's hint knowledge.
///
/// Slots whose card is already visible in this state need no binding and
/// are skipped, so calling this on a fully-known state yields nothing.
#[must_use]
pub fn slot_candidates(state: &GameState, player: PlayerId) -> Vec<SlotCandidates> {
    let hand = state.hand(player);
    let mut candidates = Vec::new();
    for slot in hand.occupied_slots() {
        if hand.card(slot).is_some() {
            continue;
        }
        let cards = state
            .deck()
            .iter()
            .copied()
            .filter(|card| hand.is_possible(slot, *card))
            .collect();
        candidates.push(SlotCandidates { slot, cards });
    }
    candidates
}

/// Most-constrained-first processing order: positions into `candidates`,
/// ascending by candidate count. Ties keep slot order (the sort is
/// stable).
#[must_use]
pub fn bind_order(candidates: &[SlotCandidates]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&idx| candidates[idx].cards.len());
    order
}

/// Sample one world for `player` from a perspective state.
pub fn sample_world(
    state: &GameState,
    player: PlayerId,
    rng: &mut GameRng,
) -> Result<GameState, SampleError> {
    let candidates = slot_candidates(state, player);
    let order = bind_order(&candidates);
    sample_with(state, player, &candidates, &order, rng)
}

/// Sample `count` independent worlds, computing the candidate lists and
/// bind order once.
pub fn sample_worlds(
    state: &GameState,
    player: PlayerId,
    count: usize,
    rng: &mut GameRng,
) -> Result<Vec<GameState>, SampleError> {
    let candidates = slot_candidates(state, player);
    let order = bind_order(&candidates);
    (0..count)
        .map(|_| sample_with(state, player, &candidates, &order, rng))
        .collect()
}

fn sample_with(
    state: &GameState,
    player: PlayerId,
    candidates: &[SlotCandidates],
    order: &[usize],
    rng: &mut GameRng,
) -> Result<GameState, SampleError> {
    let mut world = state.clone();
    let mut bound: Vec<Card> = Vec::with_capacity(order.len());

    for &idx in order {
        let SlotCandidates { slot, cards } = &candidates[idx];

        // One candidate copy is consumed per card already bound.
        let mut pool = cards.clone();
        for card in &bound {
            if let Some(pos) = pool.iter().position(|c| c == card) {
                pool.remove(pos);
            }
        }

        if pool.is_empty() {
            return Err(SampleError::EmptySlotConstraint {
                player,
                slot: *slot,
            });
        }

        let pick = pool[rng.gen_range_usize(0..pool.len())];
        world.bind_card(player, *slot, pick);
        bound.push(pick);
    }

    for card in &bound {
        let removed = world.remove_from_deck(*card);
        debug_assert!(removed, "bound card must come from the deck");
    }
    world.shuffle_deck(rng);

    Ok(world)
}
