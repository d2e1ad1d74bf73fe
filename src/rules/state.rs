//! The complete game state and the rules that drive it.
//!
//! ## GameState
//!
//! Holds the deck, every player's hand, the table fireworks, the discard
//! pile, the token pools, and turn bookkeeping. Cloning is cheap: the
//! deck and discard pile are `im` structures and share storage with the
//! clone, which the searches rely on (one clone per simulated world per
//! iteration).
//!
//! ## Views
//!
//! A server-side state knows every card. `perspective(player)` produces
//! the state as that player observes it: their own cards move into the
//! deck (identities unknown) while slot occupancy and hint knowledge
//! stay. Searches operate on perspectives and rebuild concrete hands via
//! the determinization sampler.

use crate::core::{Card, Colour, Deck, GameRng, Hand, PlayerId, PlayerMap, MAX_VALUE, MIN_VALUE};
use crate::rules::action::Move;
use crate::rules::event::GameEvent;
use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Information tokens available at game start (and the cap).
pub const MAX_INFORMATION: u8 = 8;

/// Lives at game start.
pub const MAX_LIVES: u8 = 3;

/// A perfect game: every colour played up to 5.
pub const MAX_SCORE: u8 = Colour::ALL.len() as u8 * MAX_VALUE;

/// Cards dealt to each player: five for 2-3 players, four for 4-5.
pub fn hand_size_for(player_count: usize) -> usize {
    match player_count {
        2 | 3 => 5,
        _ => 4,
    }
}

/// Why a move could not be applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesError {
    /// The game has already finished.
    GameOver,
    /// `player` tried to act while `active` holds the turn.
    NotYourTurn { player: PlayerId, active: PlayerId },
    /// Play or discard aimed at a slot holding no card.
    EmptySlot { player: PlayerId, slot: usize },
    /// Play or discard aimed at a card whose identity this state does
    /// not know (an undeterminized perspective).
    HiddenCard { player: PlayerId, slot: usize },
    /// Hint attempted with no information tokens left.
    NoInformation,
    /// Discard attempted with the information pool already full.
    MaxInformation,
    /// Players cannot hint themselves.
    SelfHint { player: PlayerId },
    /// The hint would touch no cards in the target's hand.
    EmptyHint { performer: PlayerId, target: PlayerId },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::GameOver => write!(f, "the game is over"),
            RulesError::NotYourTurn { player, active } => {
                write!(f, "{} acted but it is {}'s turn", player, active)
            }
            RulesError::EmptySlot { player, slot } => {
                write!(f, "{} has no card in slot {}", player, slot)
            }
            RulesError::HiddenCard { player, slot } => {
                write!(f, "{}'s card in slot {} is hidden in this view", player, slot)
            }
            RulesError::NoInformation => write!(f, "no information tokens left"),
            RulesError::MaxInformation => {
                write!(f, "cannot discard with a full information pool")
            }
            RulesError::SelfHint { player } => {
                write!(f, "{} cannot hint their own hand", player)
            }
            RulesError::EmptyHint { performer, target } => {
                write!(f, "{}'s hint would tell {} nothing", performer, target)
            }
        }
    }
}

impl std::error::Error for RulesError {}

/// Full game state. See the module docs for the server/perspective
/// distinction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    deck: Deck,
    hands: PlayerMap<Hand>,
    table: FxHashMap<Colour, u8>,
    discard: Vector<Card>,
    information: u8,
    lives: u8,
    turn: u32,
    active_player: PlayerId,
    moves_left: u8,
}

impl GameState {
    /// Deal a fresh game.
    ///
    /// The deal draws from its own RNG stream, so a search seeded with
    /// the same value will not retrace the shuffle.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        assert!(
            (2..=5).contains(&player_count),
            "the game seats 2-5 players"
        );

        let mut rng = GameRng::new(seed).for_context("deal");
        let mut deck = Deck::standard();
        deck.shuffle(&mut rng);

        let size = hand_size_for(player_count);
        let mut hands = PlayerMap::new(player_count, |_| Hand::new(size));
        for player in PlayerId::all(player_count) {
            for slot in 0..size {
                let card = deck.draw();
                hands[player].set_card(slot, card);
            }
        }

        Self {
            deck,
            hands,
            table: Colour::ALL.iter().map(|c| (*c, 0)).collect(),
            discard: Vector::new(),
            information: MAX_INFORMATION,
            lives: MAX_LIVES,
            turn: 0,
            active_player: PlayerId::new(0),
            moves_left: player_count as u8 + 1,
        }
    }

    // === Observers ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    /// Mutable hand access, for observers that maintain a perspective
    /// state from a stream of [`GameEvent`]s rather than from `apply`
    /// (a hint about the observer's own hand cannot be re-derived from
    /// their hidden cards).
    pub fn hand_mut(&mut self, player: PlayerId) -> &mut Hand {
        &mut self.hands[player]
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Height of the fireworks stack for `colour` (0 to 5).
    #[must_use]
    pub fn table_value(&self, colour: Colour) -> u8 {
        self.table.get(&colour).copied().unwrap_or(0)
    }

    /// Current score: the sum of the table heights.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.table.values().sum()
    }

    pub fn discard_pile(&self) -> impl Iterator<Item = &Card> {
        self.discard.iter()
    }

    #[must_use]
    pub fn information(&self) -> u8 {
        self.information
    }

    #[must_use]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    /// End-game countdown: actions remaining once the deck runs dry.
    #[must_use]
    pub fn moves_left(&self) -> u8 {
        self.moves_left
    }

    /// The game ends when the crew is out of lives, the score is
    /// perfect, or everyone has had a final turn after the deck emptied.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.lives == 0
            || self.score() == MAX_SCORE
            || (self.deck.is_empty() && self.moves_left == 0)
    }

    // === Views ===

    /// The state as `player` observes it: their own cards pushed back
    /// into the deck, occupancy and hint knowledge preserved.
    #[must_use]
    pub fn perspective(&self, player: PlayerId) -> GameState {
        let mut view = self.clone();
        for card in view.hands[player].conceal() {
            view.deck.push(card);
        }
        view
    }

    // === Determinization support ===

    /// Fix the identity of a card already sitting (hidden) in a slot.
    pub fn bind_card(&mut self, player: PlayerId, slot: usize, card: Card) {
        self.hands[player].bind_card(slot, card);
    }

    /// Remove one deck copy of `card`, returning false if none remains.
    pub fn remove_from_deck(&mut self, card: Card) -> bool {
        self.deck.remove_one(card)
    }

    /// Reorder the undrawn deck uniformly.
    pub fn shuffle_deck(&mut self, rng: &mut GameRng) {
        self.deck.shuffle(rng);
    }

    // === Moves ===

    /// Every move `player` could legally make right now.
    ///
    /// Play and discard need an occupied slot; discard additionally
    /// needs room in the information pool. Hints need a token, a target
    /// other than the acting player, and a colour/value actually present
    /// in the target's hand.
    #[must_use]
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }

        let mut moves = Vec::new();
        for slot in self.hands[player].occupied_slots() {
            moves.push(Move::Play { slot });
            if self.information < MAX_INFORMATION {
                moves.push(Move::Discard { slot });
            }
        }

        if self.information > 0 {
            for target in self.player_ids() {
                if target == player {
                    continue;
                }
                let hand = &self.hands[target];
                for colour in Colour::ALL {
                    if hand.has_colour(colour) {
                        moves.push(Move::HintColour {
                            player: target,
                            colour,
                        });
                    }
                }
                for value in MIN_VALUE..=MAX_VALUE {
                    if hand.has_value(value) {
                        moves.push(Move::HintValue {
                            player: target,
                            value,
                        });
                    }
                }
            }
        }

        moves
    }

    /// Apply `mv` for `player`, advancing the turn.
    ///
    /// Validation happens before any mutation: on `Err` the state is
    /// exactly as it was.
    pub fn apply(&mut self, player: PlayerId, mv: Move) -> Result<Vec<GameEvent>, RulesError> {
        if self.is_game_over() {
            return Err(RulesError::GameOver);
        }
        if player != self.active_player {
            return Err(RulesError::NotYourTurn {
                player,
                active: self.active_player,
            });
        }

        let events = match mv {
            Move::Play { slot } => self.apply_play(player, slot)?,
            Move::Discard { slot } => self.apply_discard(player, slot)?,
            Move::HintColour {
                player: target,
                colour,
            } => self.apply_hint_colour(player, target, colour)?,
            Move::HintValue {
                player: target,
                value,
            } => self.apply_hint_value(player, target, value)?,
        };

        self.turn += 1;
        if self.deck.is_empty() {
            self.moves_left -= 1;
        }
        self.active_player = self.active_player.next(self.player_count());

        Ok(events)
    }

    fn slot_card(&self, player: PlayerId, slot: usize) -> Result<Card, RulesError> {
        if !self.hands[player].is_occupied(slot) {
            return Err(RulesError::EmptySlot { player, slot });
        }
        self.hands[player]
            .card(slot)
            .ok_or(RulesError::HiddenCard { player, slot })
    }

    fn apply_play(&mut self, player: PlayerId, slot: usize) -> Result<Vec<GameEvent>, RulesError> {
        let card = self.slot_card(player, slot)?;

        let successful = card.value == self.table_value(card.colour) + 1;
        if successful {
            self.table.insert(card.colour, card.value);
            if card.value == MAX_VALUE && self.information < MAX_INFORMATION {
                self.information += 1;
            }
        } else {
            self.discard.push_back(card);
            self.lives -= 1;
        }

        let mut events = vec![GameEvent::CardPlayed {
            player,
            slot,
            card,
            successful,
        }];
        events.push(self.refill_slot(player, slot));
        Ok(events)
    }

    fn apply_discard(
        &mut self,
        player: PlayerId,
        slot: usize,
    ) -> Result<Vec<GameEvent>, RulesError> {
        if self.information >= MAX_INFORMATION {
            return Err(RulesError::MaxInformation);
        }
        let card = self.slot_card(player, slot)?;

        self.discard.push_back(card);
        self.information += 1;

        let mut events = vec![GameEvent::CardDiscarded { player, slot, card }];
        events.push(self.refill_slot(player, slot));
        Ok(events)
    }

    fn apply_hint_colour(
        &mut self,
        performer: PlayerId,
        target: PlayerId,
        colour: Colour,
    ) -> Result<Vec<GameEvent>, RulesError> {
        self.check_hint(performer, target)?;
        let matching = self.hands[target].matching_slots_colour(colour);
        if matching.is_empty() {
            return Err(RulesError::EmptyHint { performer, target });
        }

        self.information -= 1;
        self.hands[target].set_known_colour(colour, &matching);

        Ok(vec![GameEvent::ColourHinted {
            performer,
            target,
            colour,
            slots: matching,
        }])
    }

    fn apply_hint_value(
        &mut self,
        performer: PlayerId,
        target: PlayerId,
        value: u8,
    ) -> Result<Vec<GameEvent>, RulesError> {
        self.check_hint(performer, target)?;
        let matching = self.hands[target].matching_slots_value(value);
        if matching.is_empty() {
            return Err(RulesError::EmptyHint { performer, target });
        }

        self.information -= 1;
        self.hands[target].set_known_value(value, &matching);

        Ok(vec![GameEvent::ValueHinted {
            performer,
            target,
            value,
            slots: matching,
        }])
    }

    fn check_hint(&self, performer: PlayerId, target: PlayerId) -> Result<(), RulesError> {
        if performer == target {
            return Err(RulesError::SelfHint { player: performer });
        }
        if self.information == 0 {
            return Err(RulesError::NoInformation);
        }
        Ok(())
    }

    /// Draw a replacement into `slot`, or retire the slot if the deck is
    /// dry. Either way the slot's hint knowledge resets.
    fn refill_slot(&mut self, player: PlayerId, slot: usize) -> GameEvent {
        match self.deck.draw() {
            Some(card) => {
                self.hands[player].set_card(slot, Some(card));
                GameEvent::CardDrawn { player, slot, card }
            }
            None => {
                self.hands[player].set_card(slot, None);
                GameEvent::SlotEmptied { player, slot }
            }
        }
    }
}

#[cfg(test)]
impl GameState {
    /// Test fixture: exact deck order (last entry on top) and exact
    /// hands, fresh pools. Hands may be smaller than a dealt hand.
    pub(crate) fn fixture(deck_cards: &[Card], hands: &[&[Card]]) -> Self {
        let mut deck = Deck::empty();
        for card in deck_cards {
            deck.push(*card);
        }
        let hand_map = PlayerMap::new(hands.len(), |p| {
            let cards = hands[p.index()];
            let mut hand = Hand::new(cards.len().max(1));
            for (slot, card) in cards.iter().enumerate() {
                hand.set_card(slot, Some(*card));
            }
            hand
        });
        Self {
            deck,
            hands: hand_map,
            table: Colour::ALL.iter().map(|c| (*c, 0)).collect(),
            discard: Vector::new(),
            information: MAX_INFORMATION,
            lives: MAX_LIVES,
            turn: 0,
            active_player: PlayerId::new(0),
            moves_left: hands.len() as u8 + 1,
        }
    }
}
