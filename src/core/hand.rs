//! A player's hand with per-slot hint knowledge.
//!
//! Each slot tracks the card actually sitting there (absent in a
//! perspective view of the owner's own hand), whether the slot holds a
//! card at all, and the possibility sets implied by hint history. Hints
//! carry both positive information (the touched slots are pinned to the
//! hinted colour/value) and negative information (untouched slots cannot
//! be that colour/value).

use crate::core::card::{Card, Colour, MAX_VALUE, MIN_VALUE};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

type ColourSet = SmallVec<[Colour; 5]>;
type ValueSet = SmallVec<[u8; 5]>;

fn all_colours() -> ColourSet {
    SmallVec::from_slice(&Colour::ALL)
}

fn all_values() -> ValueSet {
    (MIN_VALUE..=MAX_VALUE).collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Slot {
    card: Option<Card>,
    occupied: bool,
    possible_colours: ColourSet,
    possible_values: ValueSet,
}

impl Slot {
    fn empty() -> Self {
        Self {
            card: None,
            occupied: false,
            possible_colours: all_colours(),
            possible_values: all_values(),
        }
    }
}

/// A hand of fixed slot count.
///
/// `card` being `None` while `occupied` is true means the slot holds a
/// card the viewer cannot see; both false/`None` means the slot ran dry
/// after the deck emptied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: Vec<Slot>,
}

impl Hand {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![Slot::empty(); size],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn card(&self, slot: usize) -> Option<Card> {
        self.slots[slot].card
    }

    pub fn is_occupied(&self, slot: usize) -> bool {
        self.slots[slot].occupied
    }

    /// Put a freshly drawn card (or nothing, once the deck is dry) into a
    /// slot. Resets the slot's possibility sets: hint history refers to
    /// the card that used to be there.
    pub fn set_card(&mut self, slot: usize, card: Option<Card>) {
        self.slots[slot] = Slot {
            card,
            occupied: card.is_some(),
            possible_colours: all_colours(),
            possible_values: all_values(),
        };
    }

    /// Fill in the concrete identity of a card already in the slot,
    /// leaving hint knowledge intact. This is how a sampled world fixes
    /// the hidden cards of the deciding player.
    pub fn bind_card(&mut self, slot: usize, card: Card) {
        debug_assert!(self.slots[slot].occupied);
        self.slots[slot].card = Some(card);
    }

    /// Strip the concrete card identities while keeping occupancy and
    /// hint knowledge, returning the cards removed. Used to build the
    /// owner's view of their own hand.
    pub fn conceal(&mut self) -> Vec<Card> {
        let mut hidden = Vec::new();
        for slot in &mut self.slots {
            if let Some(card) = slot.card.take() {
                hidden.push(card);
            }
        }
        hidden
    }

    /// Record a colour hint: `matching` slots are pinned to `colour`,
    /// every other slot loses it as a possibility.
    pub fn set_known_colour(&mut self, colour: Colour, matching: &[usize]) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if matching.contains(&idx) {
                slot.possible_colours = SmallVec::from_slice(&[colour]);
            } else {
                slot.possible_colours.retain(|c| *c != colour);
            }
        }
    }

    /// Record a value hint, mirroring [`Hand::set_known_colour`].
    pub fn set_known_value(&mut self, value: u8, matching: &[usize]) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if matching.contains(&idx) {
                slot.possible_values = SmallVec::from_slice(&[value]);
            } else {
                slot.possible_values.retain(|v| *v != value);
            }
        }
    }

    pub fn possible_colours(&self, slot: usize) -> &[Colour] {
        &self.slots[slot].possible_colours
    }

    pub fn possible_values(&self, slot: usize) -> &[u8] {
        &self.slots[slot].possible_values
    }

    /// Whether hint knowledge alone permits `card` in `slot`.
    pub fn is_possible(&self, slot: usize, card: Card) -> bool {
        self.slots[slot].possible_colours.contains(&card.colour)
            && self.slots[slot].possible_values.contains(&card.value)
    }

    /// Whether `card` could sit in `slot`: exact match when the card is
    /// visible, hint consistency when it is hidden.
    pub fn could_be(&self, slot: usize, card: Card) -> bool {
        match self.slots[slot].card {
            Some(actual) => actual == card,
            None => self.is_possible(slot, card),
        }
    }

    /// The card's identity if hint knowledge has narrowed both colour and
    /// value to a single possibility.
    pub fn known_card(&self, slot: usize) -> Option<Card> {
        let s = &self.slots[slot];
        if !s.occupied {
            return None;
        }
        match (&s.possible_colours[..], &s.possible_values[..]) {
            ([colour], [value]) => Some(Card::new(*colour, *value)),
            _ => None,
        }
    }

    /// Slots whose visible card is of the given colour.
    pub fn matching_slots_colour(&self, colour: Colour) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.card.map(|c| c.colour) == Some(colour))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Slots whose visible card has the given value.
    pub fn matching_slots_value(&self, value: u8) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.card.map(|c| c.value) == Some(value))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn has_colour(&self, colour: Colour) -> bool {
        self.slots
            .iter()
            .any(|s| s.card.map(|c| c.colour) == Some(colour))
    }

    pub fn has_value(&self, value: u8) -> bool {
        self.slots
            .iter()
            .any(|s| s.card.map(|c| c.value) == Some(value))
    }

    pub fn occupied_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.occupied)
            .map(|(idx, _)| idx)
    }

    /// Visible cards with their slot indices.
    pub fn visible_cards(&self) -> impl Iterator<Item = (usize, Card)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| s.card.map(|c| (idx, c)))
    }
}
