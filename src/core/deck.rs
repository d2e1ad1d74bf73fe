//! The draw deck.
//!
//! Uses `im::Vector` so cloning a deck inside a search iteration is O(1)
//! structural sharing rather than a 50-card copy.

use crate::core::card::{Card, Colour, MAX_VALUE, MIN_VALUE};
use crate::core::rng::GameRng;
use im::Vector;
use serde::{Deserialize, Serialize};

/// An ordered pile of cards. The back of the vector is the top of the
/// deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// An empty deck.
    pub fn empty() -> Self {
        Self {
            cards: Vector::new(),
        }
    }

    /// The full 50-card deck in unshuffled order.
    pub fn standard() -> Self {
        let mut cards = Vector::new();
        for colour in Colour::ALL {
            for value in MIN_VALUE..=MAX_VALUE {
                for _ in 0..Card::multiplicity(value) {
                    cards.push_back(Card::new(colour, value));
                }
            }
        }
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Take the top card, if any.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Put a card on top of the deck.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove one occurrence of `card`. Returns false if the deck holds
    /// no copy of it.
    pub fn remove_one(&mut self, card: Card) -> bool {
        match self.cards.index_of(&card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Uniformly reorder the deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.cards.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of copies of `card` currently in the deck.
    pub fn count(&self, card: Card) -> usize {
        self.cards.iter().filter(|c| **c == card).count()
    }
}
