//! Card primitives for the fireworks deck.
//!
//! A card is a (colour, value) pair. The standard deck carries five
//! colours with the multiplicity profile 3/2/2/2/1 for values 1 through 5,
//! so each colour contributes ten cards and the full deck holds fifty.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five firework colours.
///
/// Ordering follows declaration order and gives cards their
/// colour-then-value sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Blue,
    Green,
    Orange,
    White,
}

impl Colour {
    /// All colours, in sort order.
    pub const ALL: [Colour; 5] = [
        Colour::Red,
        Colour::Blue,
        Colour::Green,
        Colour::Orange,
        Colour::White,
    ];
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Colour::Red => "Red",
            Colour::Blue => "Blue",
            Colour::Green => "Green",
            Colour::Orange => "Orange",
            Colour::White => "White",
        };
        write!(f, "{}", name)
    }
}

/// Smallest card value.
pub const MIN_VALUE: u8 = 1;

/// Largest card value; completing a colour means reaching it.
pub const MAX_VALUE: u8 = 5;

/// A single card. Values run 1 through 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub colour: Colour,
    pub value: u8,
}

impl Card {
    /// Create a card.
    ///
    /// Values outside 1..=5 never appear in a legal deck; constructing one
    /// is a caller bug, caught here in debug builds.
    pub fn new(colour: Colour, value: u8) -> Self {
        debug_assert!((MIN_VALUE..=MAX_VALUE).contains(&value));
        Self { colour, value }
    }

    /// How many copies of this value each colour contributes to a full
    /// deck (3/2/2/2/1 for values 1 through 5).
    pub fn multiplicity(value: u8) -> u8 {
        match value {
            1 => 3,
            2 | 3 | 4 => 2,
            5 => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.colour, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_ordering_colour_then_value() {
        let red5 = Card::new(Colour::Red, 5);
        let blue1 = Card::new(Colour::Blue, 1);
        let blue3 = Card::new(Colour::Blue, 3);

        assert!(red5 < blue1, "any red sorts before any blue");
        assert!(blue1 < blue3, "within a colour, value decides");
    }

    #[test]
    fn test_multiplicity_profile() {
        assert_eq!(Card::multiplicity(1), 3);
        assert_eq!(Card::multiplicity(2), 2);
        assert_eq!(Card::multiplicity(3), 2);
        assert_eq!(Card::multiplicity(4), 2);
        assert_eq!(Card::multiplicity(5), 1);

        let per_colour: u8 = (1..=5).map(Card::multiplicity).sum();
        assert_eq!(per_colour, 10);
    }

    #[test]
    fn test_display() {
        let card = Card::new(Colour::Orange, 4);
        assert_eq!(card.to_string(), "Orange 4");
    }

    #[test]
    fn test_colour_all_matches_sort_order() {
        let mut sorted = Colour::ALL;
        sorted.sort();
        assert_eq!(sorted, Colour::ALL);
    }
}
